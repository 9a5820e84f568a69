use anyhow::Result;
use testsim_config as cli;
use testsim_format as format;

use crate::commands::{emit, load_engine};
use crate::config::ResolvedConfig;

pub(crate) fn handle(args: cli::AnalysisArgs, resolved: &ResolvedConfig) -> Result<()> {
    let engine = load_engine(&resolved.dir)?;
    let threshold = args.threshold.unwrap_or(resolved.threshold);

    let stats = engine.summary(threshold);
    let clusters = engine.cluster_report(threshold);
    tracing::info!(clusters = clusters.clusters.len(), threshold, "built cluster report");
    emit(&format::render_report(
        stats.as_ref(),
        &clusters,
        &resolved.dir,
        args.format,
    )?)
}
