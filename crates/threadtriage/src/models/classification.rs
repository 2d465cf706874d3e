use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Reply keys the extraction service is instructed to emit. Matching is
/// exact and case-sensitive; a missing key defaults to the empty string.
pub const INCIDENT_NUMBER_KEY: &str = "Incident Number";
pub const ROOT_CAUSE_KEY: &str = "Root Cause";
pub const TYPE_KEY: &str = "Type";
pub const SEVERITY_KEY: &str = "Severity";

/// One classification per thread. Either all four fields come from the
/// service and `error` is null, or the fields are empty and `error` holds the
/// final failure reason — never a mix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub thread_id: String,
    pub incident_number: String,
    pub root_cause: String,
    #[serde(rename = "type")]
    pub type_label: String,
    pub severity: String,
    pub error: Option<String>,
}

impl ClassificationResult {
    #[must_use]
    pub fn from_extraction(thread_id: &str, extraction: &Map<String, Value>) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            incident_number: field_text(extraction, INCIDENT_NUMBER_KEY),
            root_cause: field_text(extraction, ROOT_CAUSE_KEY),
            type_label: field_text(extraction, TYPE_KEY),
            severity: field_text(extraction, SEVERITY_KEY),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(thread_id: &str, error: String) -> Self {
        Self {
            thread_id: thread_id.to_string(),
            incident_number: String::new(),
            root_cause: String::new(),
            type_label: String::new(),
            severity: String::new(),
            error: Some(error),
        }
    }
}

/// Non-string values are kept via their JSON rendering rather than rejected,
/// so an off-contract reply cannot crash the pipeline.
fn field_text(extraction: &Map<String, Value>, key: &str) -> String {
    match extraction.get(key) {
        None => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationDocument {
    #[serde(default)]
    pub results: Vec<ClassificationResult>,
}
