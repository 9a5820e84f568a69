//! On-disk shape of one recorded test: one JSON document per test.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{TestRecord, test_id};

/// Identity and optional location of the recorded test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactTest {
    pub class: String,
    pub name: String,
    #[serde(
        default,
        deserialize_with = "lenient_file",
        skip_serializing_if = "Option::is_none"
    )]
    pub file: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_line",
        skip_serializing_if = "Option::is_none"
    )]
    pub line: Option<u32>,
}

/// A recorded test signature as written by the recorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureArtifact {
    pub test: ArtifactTest,
    pub signature: Vec<String>,
    /// Informational only; never trusted on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_size: Option<usize>,
}

impl SignatureArtifact {
    #[must_use]
    pub fn test_id(&self) -> String {
        test_id(&self.test.class, &self.test.name)
    }

    #[must_use]
    pub fn into_record(self) -> TestRecord {
        let id = self.test_id();
        TestRecord::new(id, self.signature).with_location(self.test.file, self.test.line)
    }
}

// Location is advisory: anything that is not a usable value reads as absent.

fn lenient_file<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_line<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
