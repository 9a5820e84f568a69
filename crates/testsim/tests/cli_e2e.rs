//! End-to-end tests for the `testsim` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

// ── Helpers ──────────────────────────────────────────────────────

/// Project directory with a `sigs/` artifact directory and an empty user
/// config home.
struct Project {
    root: TempDir,
}

impl Project {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        std::fs::create_dir_all(root.path().join("sigs")).unwrap();
        std::fs::create_dir_all(root.path().join("xdg")).unwrap();
        Self { root }
    }

    /// Three `UserTest` tests, two of them identical, plus an unrelated mailer test.
    fn with_fixture() -> Self {
        let project = Self::new();
        project.artifact(
            "UserTest",
            "test_create",
            &["User#save", "User#validate"],
            Some(("test/user_test.rb", 4)),
        );
        project.artifact(
            "UserTest",
            "test_update",
            &["User#save", "User#validate"],
            Some(("test/user_test.rb", 11)),
        );
        project.artifact(
            "UserTest",
            "test_destroy",
            &["User#destroy", "User#save"],
            None,
        );
        project.artifact("MailerTest", "test_deliver", &["Mailer#deliver"], None);
        project
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn artifact(&self, class: &str, name: &str, signature: &[&str], loc: Option<(&str, u32)>) {
        let mut test = serde_json::json!({ "class": class, "name": name });
        if let Some((file, line)) = loc {
            test["file"] = file.into();
            test["line"] = line.into();
        }
        let doc = serde_json::json!({
            "test": test,
            "signature": signature,
            "signature_size": signature.len(),
        });
        std::fs::write(
            self.path().join("sigs").join(format!("{class}-{name}.json")),
            serde_json::to_string_pretty(&doc).unwrap(),
        )
        .unwrap();
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_testsim"));
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"))
            .env_remove("RUST_LOG");
        cmd
    }

    /// Command with `--dir sigs` already applied.
    fn analyze(&self) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("--dir").arg("sigs");
        cmd
    }
}

fn stdout_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout is JSON")
}

// ── Summary ──────────────────────────────────────────────────────

#[test]
fn summary_prints_statistics() {
    let project = Project::with_fixture();
    project
        .analyze()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Similarity Summary"))
        .stdout(predicate::str::contains("Total tests: 4"))
        .stdout(predicate::str::contains("Similarity clusters (>=80%):"))
        .stdout(predicate::str::contains("  clusters: 1"));
}

#[test]
fn summary_json_is_machine_readable() {
    let project = Project::with_fixture();
    let v = stdout_json(
        project
            .analyze()
            .args(["summary", "--format", "json", "--threshold", "0.3"]),
    );
    assert_eq!(v["total_tests"], 4);
    assert_eq!(v["threshold"], 0.3);
    assert_eq!(v["largest_cluster"], 3);
}

#[test]
fn missing_artifact_directory_reports_no_tests() {
    let project = Project::new();
    project
        .cmd()
        .args(["--dir", "nowhere", "summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recorded tests found in nowhere"))
        .stderr(predicate::str::contains("artifact directory does not exist"));
}

// ── List ─────────────────────────────────────────────────────────

#[test]
fn list_flags_identical_tests() {
    let project = Project::with_fixture();
    project
        .analyze()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded tests: 4"))
        .stdout(predicate::str::contains("Potentially redundant (>= 80% similar):"))
        .stdout(predicate::str::contains("  100.0%  UserTest#test_create\n"))
        .stdout(predicate::str::contains("        -> UserTest#test_update\n"));
}

#[test]
fn list_json_matches_documented_shape() {
    let project = Project::with_fixture();
    let v = stdout_json(project.analyze().args(["list", "--format", "json"]));

    assert_eq!(v["total_tests"], 4);
    assert_eq!(v["threshold"], 80);
    assert_eq!(v["potentially_redundant"].as_array().unwrap().len(), 2);
    assert_eq!(v["all_tests"].as_array().unwrap().len(), 4);
    assert_eq!(v["potentially_redundant"][0]["test"]["line"], 4);
}

#[test]
fn list_json_for_empty_directory() {
    let project = Project::new();
    let v = stdout_json(project.analyze().args(["list", "--format", "json"]));
    assert_eq!(v, serde_json::json!({ "tests": [], "potentially_redundant": [] }));
}

#[test]
fn out_of_range_threshold_is_rejected() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["list", "--threshold", "80"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("threshold must be between 0.0 and 1.0"));
}

// ── Check ────────────────────────────────────────────────────────

#[test]
fn check_shows_differences() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["check", "UserTest#test_destroy", "--threshold", "0.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Similar tests for: UserTest#test_destroy",
        ))
        .stdout(predicate::str::contains("33.3% similar: UserTest#test_create"))
        .stdout(predicate::str::contains("  Only in test_destroy:\n    - User#destroy"))
        .stdout(predicate::str::contains("  Common: 1 method(s)"));
}

#[test]
fn check_uses_its_own_default_threshold() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["check", "UserTest#test_destroy"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No similar tests found for UserTest#test_destroy (threshold: 50%)",
        ));
}

#[test]
fn check_unknown_test_lists_ids_and_fails() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["check", "UserTest#test_missing"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Test not found: UserTest#test_missing"))
        .stdout(predicate::str::contains("Available tests:\n  MailerTest#test_deliver\n"))
        .stderr(predicate::str::contains("Error: Test not found"))
        .stderr(predicate::str::contains("Hints:"));
}

#[test]
fn check_unknown_test_json() {
    let project = Project::with_fixture();
    let output = project
        .analyze()
        .args(["check", "Nope#nope", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let v: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(
        v,
        serde_json::json!({ "error": "Test not found", "test_id": "Nope#nope" })
    );
}

// ── Diff ─────────────────────────────────────────────────────────

#[test]
fn diff_compares_two_tests() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["diff", "UserTest#test_create", "UserTest#test_destroy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Similarity: 33.3%"))
        .stdout(predicate::str::contains("Only in test_create (1):\n  - User#validate"))
        .stdout(predicate::str::contains("Common (1):\n  - User#save"));
}

#[test]
fn diff_with_unknown_test_fails() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["diff", "UserTest#test_create", "Ghost#test"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Test not found: Ghost#test"));
}

// ── Report ───────────────────────────────────────────────────────

#[test]
fn report_lists_clusters() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["report", "--threshold", "0.3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cluster 1 (3 tests):"))
        .stdout(predicate::str::contains("    test/user_test.rb:11"))
        .stdout(predicate::str::contains("  Common code paths (1):\n    User#save"));
}

#[test]
fn report_without_clusters() {
    let project = Project::new();
    project.artifact("A", "a", &["X#x"], None);
    project.artifact("B", "b", &["Y#y"], None);
    project
        .analyze()
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("No similarity clusters found."));
}

// ── Artifacts ────────────────────────────────────────────────────

#[test]
fn broken_artifact_names_the_file() {
    let project = Project::with_fixture();
    std::fs::write(project.path().join("sigs").join("Broken-test.json"), "{oops").unwrap();
    project
        .analyze()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse signature artifact"))
        .stderr(predicate::str::contains("Broken-test.json"))
        .stderr(predicate::str::contains("re-run its test"));
}

// ── Configuration ────────────────────────────────────────────────

#[test]
fn local_config_sets_directory_and_threshold() {
    let project = Project::with_fixture();
    std::fs::write(
        project.path().join("testsim.toml"),
        "[store]\noutput_dir = \"sigs\"\n\n[analysis]\nthreshold = 0.3\n",
    )
    .unwrap();

    let v = stdout_json(project.cmd().args(["list", "--format", "json"]));
    assert_eq!(v["threshold"], 30);
    assert_eq!(v["potentially_redundant"].as_array().unwrap().len(), 3);
}

#[test]
fn flags_override_config() {
    let project = Project::with_fixture();
    std::fs::write(
        project.path().join("testsim.toml"),
        "[store]\noutput_dir = \"elsewhere\"\n\n[analysis]\nthreshold = 0.3\n",
    )
    .unwrap();

    let v = stdout_json(project.analyze().args([
        "list",
        "--format",
        "json",
        "--threshold",
        "0.9",
    ]));
    assert_eq!(v["total_tests"], 4);
    assert_eq!(v["threshold"], 90);
}

#[test]
fn explicit_config_path_is_used() {
    let project = Project::with_fixture();
    std::fs::write(
        project.path().join("custom.toml"),
        "[analysis]\ncheck_threshold = 0.3\n",
    )
    .unwrap();

    project
        .analyze()
        .args(["check", "UserTest#test_destroy", "--config", "custom.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("33.3% similar"));
}

#[test]
fn invalid_config_errors_out() {
    let project = Project::with_fixture();
    std::fs::write(project.path().join("testsim.toml"), "invalid = toml").unwrap();

    project
        .analyze()
        .arg("summary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration"))
        .stderr(predicate::str::contains("testsim init --force"));
}

#[test]
fn missing_explicit_config_errors_out() {
    let project = Project::with_fixture();
    project
        .analyze()
        .args(["summary", "--config", "absent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load configuration absent.toml"));
}

// `dirs` honours XDG_CONFIG_HOME only on Linux.
#[cfg(target_os = "linux")]
#[test]
fn user_config_dir_is_consulted() {
    let project = Project::with_fixture();
    let user_dir = project.path().join("xdg").join("testsim");
    std::fs::create_dir_all(&user_dir).unwrap();
    std::fs::write(
        user_dir.join("testsim.toml"),
        "[store]\noutput_dir = \"sigs\"\n",
    )
    .unwrap();

    project
        .cmd()
        .arg("summary")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total tests: 4"));
}

// ── Init & completions ───────────────────────────────────────────

#[test]
fn init_writes_template_and_refuses_to_overwrite() {
    let project = Project::new();
    project
        .cmd()
        .arg("init")
        .assert()
        .success()
        .stderr(predicate::str::contains("Created"));

    let written = std::fs::read_to_string(project.path().join("testsim.toml")).unwrap();
    assert!(written.contains("check_threshold = 0.5"));

    project
        .cmd()
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    project.cmd().args(["init", "--force"]).assert().success();
}

#[test]
fn init_print_writes_nothing() {
    let project = Project::new();
    project
        .cmd()
        .args(["init", "--print"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[analysis]"));
    assert!(!project.path().join("testsim.toml").exists());
}

#[test]
fn completions_bash_output_contains_command() {
    let project = Project::new();
    project
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("testsim"));
}

// ── Logging ──────────────────────────────────────────────────────

#[test]
fn verbose_logs_go_to_stderr() {
    let project = Project::with_fixture();
    let assert = project
        .analyze()
        .args(["-v", "list", "--format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded snapshot"));
    let stdout = assert.get_output().stdout.clone();
    assert!(serde_json::from_slice::<Value>(&stdout).is_ok());
}
