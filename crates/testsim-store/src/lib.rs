//! # testsim-store
//!
//! **Tier 1 (I/O)**
//!
//! Reads and writes per-test signature artifacts and defines the seam through
//! which a test harness reports the callables a test reached.
//!
//! ## What belongs here
//! * Snapshot loading from an artifact directory
//! * Artifact writing (one JSON document per test)
//! * The `Tracer` capability and the path filter deciding what counts as
//!   application code
//!
//! ## What does NOT belong here
//! * Similarity analysis (use testsim-engine)
//! * Rendering (use testsim-format)
//! * Runtime instrumentation of a specific test framework

mod load;
mod trace;
mod write;

pub use load::{artifact_paths, load_snapshot, read_artifact};
pub use trace::{
    CallSite, DEFAULT_PATH_FILTER, PathFilter, SignatureRecorder, SourceLocation, TestIdentity,
    Tracer, record_test,
};
pub use write::{ArtifactWriter, filename_for, relative_path};

/// Default artifact directory, relative to the project root.
pub const DEFAULT_OUTPUT_DIR: &str = "tmp/test_similarity";
