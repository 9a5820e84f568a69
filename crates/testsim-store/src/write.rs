use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use testsim_types::{ArtifactTest, Signature, SignatureArtifact};

use crate::trace::{SourceLocation, TestIdentity};

/// Writes one artifact per test into an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
    base_dir: Option<PathBuf>,
}

impl ArtifactWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_dir: None,
        }
    }

    /// Directory that recorded source files are made relative to.
    /// Defaults to the working directory at write time.
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the artifact for `test` and return its path.
    pub fn write(
        &self,
        test: &TestIdentity,
        signature: &Signature,
        location: Option<&SourceLocation>,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.output_dir.display()
            )
        })?;

        let base = match &self.base_dir {
            Some(dir) => Some(dir.clone()),
            None => std::env::current_dir().ok(),
        };

        let mut sorted: Vec<String> = signature.iter().cloned().collect();
        sorted.sort_unstable();

        let artifact = SignatureArtifact {
            test: ArtifactTest {
                class: test.class.clone(),
                name: test.name.clone(),
                file: location.map(|loc| relative_path(&loc.file, base.as_deref())),
                line: location.map(|loc| loc.line),
            },
            signature_size: Some(sorted.len()),
            signature: sorted,
        };

        let path = self.output_dir.join(filename_for(&test.class, &test.name));
        let json = serde_json::to_string_pretty(&artifact)?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::debug!(
            test = %test.id(),
            path = %path.display(),
            callables = artifact.signature.len(),
            "wrote signature artifact"
        );
        Ok(path)
    }
}

/// Artifact file name for a test: `"<class>-<name>.json"`.
///
/// Path separators are replaced so the file always lands in the output
/// directory.
#[must_use]
pub fn filename_for(class: &str, name: &str) -> String {
    let clean = |s: &str| s.replace(['/', '\\'], "_");
    format!("{}-{}.json", clean(class), clean(name))
}

/// `path` relative to `base` when it lies underneath it, otherwise unchanged.
#[must_use]
pub fn relative_path(path: &Path, base: Option<&Path>) -> String {
    base.and_then(|b| path.strip_prefix(b).ok())
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
