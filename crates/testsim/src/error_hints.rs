use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("test not found") {
        push_hint(&mut out, "Run `testsim list` to see the recorded test ids.");
        push_hint(&mut out, "Test ids have the form `TestClass#test_name`.");
    }

    if haystack.contains("failed to read artifact directory") {
        push_hint(
            &mut out,
            "Point `--dir` (or `store.output_dir` in testsim.toml) at the directory holding the signature artifacts.",
        );
    }

    if haystack.contains("failed to parse signature artifact") {
        push_hint(
            &mut out,
            "Delete the damaged artifact and re-run its test to record it again.",
        );
    }

    if haystack.contains("failed to load configuration") && haystack.contains("no such file") {
        push_hint(
            &mut out,
            "Create a config with `testsim init`, or drop `--config` to use the defaults.",
        );
    }

    if haystack.contains("toml") && (haystack.contains("parse") || haystack.contains("invalid")) {
        push_hint(
            &mut out,
            "Check `testsim.toml` syntax and key names, or regenerate with `testsim init --force`.",
        );
    }

    if haystack.contains("threshold must be between") {
        push_hint(&mut out, "Thresholds are fractions: use 0.8 for 80%.");
    }

    if haystack.contains("path_filter") {
        push_hint(
            &mut out,
            "Path filters are glob patterns such as `**/app/**`.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
