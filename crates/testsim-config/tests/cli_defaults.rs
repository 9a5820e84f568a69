//! Tests verifying CLI default values match the help text.

use clap::Parser;
use proptest::prelude::*;
use testsim_config::{Cli, Commands, OutputFormat, Shell, parse_threshold};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("testsim").chain(args.iter().copied())).unwrap()
}

#[test]
fn output_format_default_is_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}

#[test]
fn list_without_flags_leaves_threshold_unset() {
    let cli = parse(&["list"]);
    let Commands::List(args) = cli.command else {
        panic!("expected list");
    };
    assert_eq!(args.threshold, None);
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(cli.global.verbose, 0);
    assert!(cli.global.dir.is_none());
}

#[test]
fn global_flags_parse_before_subcommand() {
    let cli = parse(&["--dir", "out", "-vv", "summary", "--format", "json"]);
    assert_eq!(cli.global.dir.as_deref(), Some(std::path::Path::new("out")));
    assert_eq!(cli.global.verbose, 2);
    let Commands::Summary(args) = cli.command else {
        panic!("expected summary");
    };
    assert_eq!(args.format, OutputFormat::Json);
}

#[test]
fn verbose_and_config_are_accepted_after_subcommand() {
    let cli = parse(&["report", "-v", "--config", "custom.toml"]);
    assert_eq!(cli.global.verbose, 1);
    assert_eq!(
        cli.global.config.as_deref(),
        Some(std::path::Path::new("custom.toml"))
    );
}

#[test]
fn check_takes_test_id_and_threshold() {
    let cli = parse(&["check", "UserTest#test_save", "--threshold", "0.3"]);
    let Commands::Check(args) = cli.command else {
        panic!("expected check");
    };
    assert_eq!(args.test_id, "UserTest#test_save");
    assert_eq!(args.threshold, Some(0.3));
}

#[test]
fn diff_takes_two_ids() {
    let cli = parse(&["diff", "A#a", "B#b"]);
    let Commands::Diff(args) = cli.command else {
        panic!("expected diff");
    };
    assert_eq!((args.test_a.as_str(), args.test_b.as_str()), ("A#a", "B#b"));
}

#[test]
fn init_defaults_to_current_directory() {
    let cli = parse(&["init"]);
    let Commands::Init(args) = cli.command else {
        panic!("expected init");
    };
    assert_eq!(args.dir, std::path::PathBuf::from("."));
    assert!(!args.force);
    assert!(!args.print);
}

#[test]
fn completions_take_a_shell() {
    let cli = parse(&["completions", "zsh"]);
    let Commands::Completions(args) = cli.command else {
        panic!("expected completions");
    };
    assert_eq!(args.shell, Shell::Zsh);
}

#[test]
fn out_of_range_threshold_is_a_usage_error() {
    let err = Cli::try_parse_from(["testsim", "list", "--threshold", "1.5"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["testsim"]).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn thresholds_in_range_round_trip(value in 0.0f64..=1.0) {
        prop_assert_eq!(parse_threshold(&value.to_string()), Ok(value));
    }

    #[test]
    fn thresholds_above_one_are_rejected(value in 1.0001f64..1000.0) {
        prop_assert!(parse_threshold(&value.to_string()).is_err());
    }
}
