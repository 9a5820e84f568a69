use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use testsim_config::{self as cli, TomlConfig};
use testsim_store::{DEFAULT_OUTPUT_DIR, DEFAULT_PATH_FILTER, PathFilter};

/// Settings after merging flags, the config file and built-in defaults.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ResolvedConfig {
    pub dir: PathBuf,
    pub threshold: f64,
    pub check_threshold: f64,
}

/// Find the config file: `--config`, else `./testsim.toml`, else the user
/// config directory. Only an explicit `--config` must exist.
pub(crate) fn discover(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(cli::CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?
        .join("testsim")
        .join(cli::CONFIG_FILE_NAME);
    user.is_file().then_some(user)
}

pub(crate) fn load(path: &Path) -> Result<TomlConfig> {
    let config = TomlConfig::from_file(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

pub(crate) fn resolve(global: &cli::GlobalArgs) -> Result<ResolvedConfig> {
    let file = match discover(global.config.as_deref()) {
        Some(path) => Some((load(&path)?, path)),
        None => None,
    };
    resolve_with(global, file.as_ref().map(|(config, path)| (config, path.as_path())))
}

fn resolve_with(
    global: &cli::GlobalArgs,
    file: Option<(&TomlConfig, &Path)>,
) -> Result<ResolvedConfig> {
    let toml = file.map(|(config, _)| config);
    let source = file.map_or_else(
        || "configuration".to_string(),
        |(_, path)| path.display().to_string(),
    );

    let threshold = configured_threshold(
        toml.and_then(|c| c.analysis.threshold),
        cli::DEFAULT_THRESHOLD,
        "analysis.threshold",
        &source,
    )?;
    let check_threshold = configured_threshold(
        toml.and_then(|c| c.analysis.check_threshold),
        cli::DEFAULT_CHECK_THRESHOLD,
        "analysis.check_threshold",
        &source,
    )?;

    // Only the recorder applies the filter; analysis just validates it.
    if let Some(patterns) = toml.and_then(|c| c.store.path_filter.as_deref()) {
        PathFilter::new(patterns)
            .with_context(|| format!("Invalid store.path_filter in {source}"))?;
        tracing::debug!(?patterns, "path filter");
    } else {
        tracing::debug!(pattern = DEFAULT_PATH_FILTER, "path filter");
    }

    let dir = global
        .dir
        .clone()
        .or_else(|| toml.and_then(|c| c.store.output_dir.clone()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

    Ok(ResolvedConfig {
        dir,
        threshold,
        check_threshold,
    })
}

fn configured_threshold(
    value: Option<f64>,
    default: f64,
    key: &str,
    source: &str,
) -> Result<f64> {
    match value {
        Some(v) => {
            cli::check_threshold(v).map_err(|msg| anyhow!("Invalid {key} in {source}: {msg}"))
        }
        None => Ok(default),
    }
}
