use anyhow::Result;
use testsim_config as cli;
use testsim_format as format;

use crate::commands::{emit, load_engine};
use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::AnalysisArgs, resolved: &ResolvedConfig) -> Result<()> {
    let engine = load_engine(&resolved.dir)?;
    let threshold = args.threshold.unwrap_or(resolved.threshold);

    let report = engine.list(threshold);
    let stats = engine.summary(threshold);
    tracing::info!(
        redundant = report.potentially_redundant.len(),
        threshold,
        "listed tests"
    );
    emit(&format::render_list(
        &report,
        stats.as_ref(),
        &resolved.dir,
        args.format,
    )?)
}
