use std::collections::BTreeMap;

use rustc_hash::FxHashSet;

use crate::TestRef;

/// Distinct application-code callables observed during one test run.
pub type Signature = FxHashSet<String>;

/// One recorded test execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub id: String,
    pub signature: Signature,
    pub source_file: Option<String>,
    pub source_line: Option<u32>,
}

impl TestRecord {
    pub fn new<I, S>(id: impl Into<String>, signature: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            signature: signature.into_iter().map(Into::into).collect(),
            source_file: None,
            source_line: None,
        }
    }

    #[must_use]
    pub fn with_location(mut self, file: Option<String>, line: Option<u32>) -> Self {
        self.source_file = file;
        self.source_line = line;
        self
    }

    #[must_use]
    pub fn test_ref(&self) -> TestRef {
        TestRef {
            id: self.id.clone(),
            file: self.source_file.clone(),
            line: self.source_line,
        }
    }

    /// Signature members in ascending order.
    #[must_use]
    pub fn sorted_signature(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.signature.iter().map(String::as_str).collect();
        out.sort_unstable();
        out
    }
}

/// Immutable `test_id -> TestRecord` mapping for one analysis session.
///
/// Iteration is ordered by test id; every deterministic tie-break in the
/// engine relies on this order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    records: BTreeMap<String, TestRecord>,
}

impl Snapshot {
    /// Build a snapshot; a later record for an id replaces the earlier one.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = TestRecord>,
    {
        let mut builder = SnapshotBuilder::default();
        for record in records {
            builder.insert(record);
        }
        builder.build()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&TestRecord> {
        self.records.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &TestRecord> {
        self.records.values()
    }

    #[must_use]
    pub fn test_ref(&self, id: &str) -> Option<TestRef> {
        self.records.get(id).map(TestRecord::test_ref)
    }
}

impl FromIterator<TestRecord> for Snapshot {
    fn from_iter<T: IntoIterator<Item = TestRecord>>(iter: T) -> Self {
        Self::from_records(iter)
    }
}

/// Accumulates records while a snapshot is being loaded.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    records: BTreeMap<String, TestRecord>,
}

impl SnapshotBuilder {
    /// Insert a record, returning the one it replaced.
    pub fn insert(&mut self, record: TestRecord) -> Option<TestRecord> {
        self.records.insert(record.id.clone(), record)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn build(self) -> Snapshot {
        Snapshot {
            records: self.records,
        }
    }
}
