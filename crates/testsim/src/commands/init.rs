use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use testsim_config as cli;

/// Write the config template; returns the path, or `None` with `--print`.
pub(crate) fn write_template(args: &cli::InitArgs) -> Result<Option<PathBuf>> {
    if args.print {
        print!("{}", cli::CONFIG_TEMPLATE);
        return Ok(None);
    }

    if !args.dir.is_dir() {
        bail!("Directory does not exist: {}", args.dir.display());
    }

    let path = args.dir.join(cli::CONFIG_FILE_NAME);
    if path.exists() && !args.force {
        bail!(
            "{} already exists. Use --force to overwrite, or --print to just view the template.",
            path.display()
        );
    }

    std::fs::write(&path, cli::CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(Some(path))
}

pub(crate) fn handle(args: cli::InitArgs) -> Result<()> {
    if let Some(path) = write_template(&args)? {
        eprintln!("Created {}", path.display());
    }
    Ok(())
}
