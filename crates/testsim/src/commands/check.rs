use anyhow::{Result, bail};
use testsim_config as cli;
use testsim_format::{self as format, CheckView};

use crate::commands::{emit, load_engine};
use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::CheckArgs, resolved: &ResolvedConfig) -> Result<()> {
    let engine = load_engine(&resolved.dir)?;
    let threshold = args.threshold.unwrap_or(resolved.check_threshold);
    let stats = engine.summary(threshold);

    if let Some(report) = engine.check(&args.test_id, threshold) {
        return emit(&format::render_check(
            CheckView::Found(&report),
            stats.as_ref(),
            args.format,
        )?);
    }

    let available: Vec<&str> = engine.snapshot().ids().collect();
    let view = CheckView::NotFound {
        test_id: &args.test_id,
        available: &available,
    };
    emit(&format::render_check(view, stats.as_ref(), args.format)?)?;
    bail!("Test not found: {}", args.test_id)
}
