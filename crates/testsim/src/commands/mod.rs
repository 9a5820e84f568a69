pub(crate) mod check;
pub(crate) mod completions;
pub(crate) mod diff;
pub(crate) mod init;
pub(crate) mod list;
pub(crate) mod report;
pub(crate) mod summary;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use testsim_config as cli;
use testsim_engine::Engine;

use crate::config;

pub(crate) fn dispatch(cli: cli::Cli) -> Result<()> {
    let global = &cli.global;
    match cli.command {
        cli::Commands::Summary(args) => summary::handle(args, &config::resolve(global)?),
        cli::Commands::List(args) => list::handle(args, &config::resolve(global)?),
        cli::Commands::Check(args) => check::handle(args, &config::resolve(global)?),
        cli::Commands::Diff(args) => diff::handle(args, &config::resolve(global)?),
        cli::Commands::Report(args) => report::handle(args, &config::resolve(global)?),
        cli::Commands::Init(args) => init::handle(args),
        cli::Commands::Completions(args) => completions::handle(args),
    }
}

/// Load the artifact directory into a fresh engine.
pub(crate) fn load_engine(dir: &Path) -> Result<Engine> {
    if !dir.exists() {
        tracing::warn!(
            dir = %dir.display(),
            "artifact directory does not exist; record a test run first"
        );
    }
    let snapshot = testsim_store::load_snapshot(dir)?;
    tracing::info!(tests = snapshot.len(), dir = %dir.display(), "loaded snapshot");
    Ok(Engine::new(snapshot))
}

/// Write rendered output to stdout, ending with exactly one newline.
pub(crate) fn emit(rendered: &str) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if !rendered.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
