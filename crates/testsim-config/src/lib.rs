//! # testsim-config
//!
//! **Tier 4 (Configuration)**
//!
//! This crate defines the CLI arguments and configuration file structures.
//!
//! ## What belongs here
//! * Clap `Parser`, `Args`, `Subcommand` structs
//! * Configuration file struct definitions (Serde)
//! * Default values and enums
//!
//! ## What does NOT belong here
//! * Business logic
//! * I/O operations (except config file parsing)

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Threshold used by `summary`, `list` and `report` when none is configured.
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Threshold used by `check` when none is configured.
pub const DEFAULT_CHECK_THRESHOLD: f64 = 0.5;

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "testsim.toml";

/// `testsim`: find tests that exercise the same application code.
///
/// Reads the per-test signature artifacts recorded during a test run and
/// reports near-duplicate tests and clusters of similar tests.
#[derive(Parser, Debug)]
#[command(name = "testsim", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding the signature artifacts [default: tmp/test_similarity].
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Configuration file (defaults to ./testsim.toml, then the user config dir).
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (repeat for more detail).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print best-match, cluster and concentration statistics.
    Summary(AnalysisArgs),

    /// List every recorded test with its closest match.
    List(AnalysisArgs),

    /// Show the tests similar to one test and how their signatures differ.
    Check(CheckArgs),

    /// Compare the signatures of two tests.
    Diff(DiffArgs),

    /// Print the summary followed by every similarity cluster.
    Report(AnalysisArgs),

    /// Write a `testsim.toml` template to the target directory.
    Init(InitArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct AnalysisArgs {
    /// Minimum similarity (0.0 to 1.0) [default: 0.8].
    #[arg(long, value_name = "T", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Test id in `TestClass#test_name` form.
    #[arg(value_name = "TEST_ID")]
    pub test_id: String,

    /// Minimum similarity (0.0 to 1.0) [default: 0.5].
    #[arg(long, value_name = "T", value_parser = parse_threshold)]
    pub threshold: Option<f64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DiffArgs {
    #[arg(value_name = "TEST_A")]
    pub test_a: String,

    #[arg(value_name = "TEST_B")]
    pub test_b: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    /// Target directory (defaults to ".").
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub dir: PathBuf,

    /// Overwrite an existing `testsim.toml`.
    #[arg(long)]
    pub force: bool,

    /// Print the template to stdout instead of writing a file.
    #[arg(long)]
    pub print: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Powershell,
    Zsh,
}

/// Clap value parser for similarity thresholds: a number in `[0, 1]`.
pub fn parse_threshold(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    check_threshold(value)
}

/// Accept `value` only when it lies in `[0, 1]`.
pub fn check_threshold(value: f64) -> Result<f64, String> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("threshold must be between 0.0 and 1.0, got {value}"))
    }
}

// =============================================================================
// TOML Configuration File Structures
// =============================================================================

/// Root TOML configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    /// Where artifacts live and what counts as application code.
    pub store: StoreConfig,

    /// Analysis thresholds.
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Artifact directory, relative to the working directory.
    pub output_dir: Option<PathBuf>,

    /// Glob patterns selecting application source files.
    pub path_filter: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Threshold for `summary`, `list` and `report`.
    pub threshold: Option<f64>,

    /// Threshold for `check`.
    pub check_threshold: Option<f64>,
}

impl TomlConfig {
    /// Load configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Load configuration from a file path.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Template written by `testsim init`.
pub const CONFIG_TEMPLATE: &str = r#"# testsim configuration

[store]
# Directory holding one JSON signature artifact per test.
output_dir = "tmp/test_similarity"
# Source files matching these globs count as application code.
path_filter = ["**/app/**"]

[analysis]
# Minimum similarity for summary, list and report.
threshold = 0.8
# Minimum similarity for check.
check_threshold = 0.5
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn template_parses_to_documented_defaults() {
        let config = TomlConfig::parse(CONFIG_TEMPLATE).unwrap();
        assert_eq!(
            config.store.output_dir.as_deref(),
            Some(Path::new("tmp/test_similarity"))
        );
        assert_eq!(
            config.store.path_filter,
            Some(vec!["**/app/**".to_string()])
        );
        assert_eq!(config.analysis.threshold, Some(DEFAULT_THRESHOLD));
        assert_eq!(config.analysis.check_threshold, Some(DEFAULT_CHECK_THRESHOLD));
    }

    #[test]
    fn threshold_bounds_are_inclusive() {
        assert_eq!(parse_threshold("0"), Ok(0.0));
        assert_eq!(parse_threshold("1.0"), Ok(1.0));
        assert_eq!(parse_threshold(" 0.75 "), Ok(0.75));
        assert!(parse_threshold("1.01").is_err());
        assert!(parse_threshold("-0.1").is_err());
        assert!(parse_threshold("NaN").is_err());
        assert!(parse_threshold("high").is_err());
    }
}
