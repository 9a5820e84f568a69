//! Trace-capture seam.
//!
//! A test harness observes the callables a test reaches and reports them
//! through a [`Tracer`]. Only call sites whose source path passes the
//! [`PathFilter`] count as application code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use testsim_types::{Signature, test_id};

use crate::write::ArtifactWriter;

/// Application code lives under an `app/` directory unless configured
/// otherwise.
pub const DEFAULT_PATH_FILTER: &str = "**/app/**";

/// Glob patterns deciding which source paths count as application code.
#[derive(Debug, Clone)]
pub struct PathFilter {
    patterns: Vec<String>,
    set: GlobSet,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(
                Glob::new(pattern)
                    .with_context(|| format!("Invalid path filter pattern `{pattern}`"))?,
            );
        }
        Ok(Self {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set: builder.build()?,
        })
    }

    /// The built-in `**/app/**` filter.
    pub fn app_default() -> Result<Self> {
        Self::new(&[DEFAULT_PATH_FILTER])
    }

    #[must_use]
    pub fn is_match(&self, path: &str) -> bool {
        self.set.is_match(path)
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

/// Identity of the test being recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestIdentity {
    pub class: String,
    pub name: String,
}

impl TestIdentity {
    pub fn new(class: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> String {
        test_id(&self.class, &self.name)
    }
}

/// Where a test is defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// One observed call.
#[derive(Debug, Clone, Copy)]
pub struct CallSite<'a> {
    /// Source file defining the callable.
    pub path: &'a str,
    /// Class or module owning the callable.
    pub owner: &'a str,
    pub method: &'a str,
}

impl CallSite<'_> {
    #[must_use]
    pub fn identifier(&self) -> String {
        test_id(self.owner, self.method)
    }
}

/// Accumulates the signature of a single test run.
#[derive(Debug)]
pub struct SignatureRecorder<'f> {
    filter: &'f PathFilter,
    signature: Signature,
}

impl<'f> SignatureRecorder<'f> {
    pub fn new(filter: &'f PathFilter) -> Self {
        Self {
            filter,
            signature: Signature::default(),
        }
    }

    /// Record `call` if it is application code. Returns whether it was kept.
    pub fn observe(&mut self, call: &CallSite<'_>) -> bool {
        if !self.filter.is_match(call.path) {
            return false;
        }
        self.signature.insert(call.identifier());
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.signature.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.signature.is_empty()
    }

    #[must_use]
    pub fn finish(self) -> Signature {
        self.signature
    }
}

/// Runs (or replays) one test and reports the application callables it
/// reached.
pub trait Tracer {
    fn trace(&mut self, test: &TestIdentity) -> Result<Signature>;
}

impl<T: Tracer + ?Sized> Tracer for &mut T {
    fn trace(&mut self, test: &TestIdentity) -> Result<Signature> {
        (**self).trace(test)
    }
}

/// Trace `test` and persist its artifact; returns the artifact path.
pub fn record_test<T: Tracer + ?Sized>(
    tracer: &mut T,
    test: &TestIdentity,
    location: Option<&SourceLocation>,
    writer: &ArtifactWriter,
) -> Result<PathBuf> {
    let signature = tracer
        .trace(test)
        .with_context(|| format!("Failed to trace {}", test.id()))?;
    writer.write(test, &signature, location)
}
