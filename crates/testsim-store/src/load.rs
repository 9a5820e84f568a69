use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use testsim_types::{SignatureArtifact, Snapshot, SnapshotBuilder};

/// Load every `*.json` artifact directly inside `dir`.
///
/// Files are read in file-name order and a later artifact for the same test
/// id replaces the earlier one. A missing directory is an empty snapshot.
pub fn load_snapshot(dir: &Path) -> Result<Snapshot> {
    let paths = artifact_paths(dir)?;
    let mut builder = SnapshotBuilder::default();

    for path in &paths {
        let record = read_artifact(path)?.into_record();
        let id = record.id.clone();
        if builder.insert(record).is_some() {
            tracing::warn!(test = %id, path = %path.display(), "artifact replaces earlier record");
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        files = paths.len(),
        tests = builder.len(),
        "loaded signature artifacts"
    );
    Ok(builder.build())
}

/// Artifact files in `dir`, sorted by file name.
pub fn artifact_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(dir = %dir.display(), "artifact directory does not exist");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("Failed to read artifact directory {}", dir.display()));
        }
    };

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to read artifact directory {}", dir.display()))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Parse one artifact file.
pub fn read_artifact(path: &Path) -> Result<SignatureArtifact> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse signature artifact {}", path.display()))
}
