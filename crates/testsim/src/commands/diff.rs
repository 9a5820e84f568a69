use anyhow::{Result, bail};
use testsim_config as cli;
use testsim_format as format;

use crate::commands::{emit, load_engine};
use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::DiffArgs, resolved: &ResolvedConfig) -> Result<()> {
    let engine = load_engine(&resolved.dir)?;

    let Some(diff) = engine.diff(&args.test_a, &args.test_b) else {
        let missing = if engine.snapshot().contains(&args.test_a) {
            &args.test_b
        } else {
            &args.test_a
        };
        bail!("Test not found: {missing}");
    };

    emit(&format::render_diff(
        &args.test_a,
        &args.test_b,
        &diff,
        args.format,
    )?)
}
