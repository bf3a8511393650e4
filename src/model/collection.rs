//! Collection descriptor input types.
//!
//! The descriptor shape matches the challenge input JSON consumed by the
//! original system: challenge identifiers, an ordered document list, a
//! persona role, and a job-to-be-done task.

use serde::{Deserialize, Serialize};

/// Input descriptor for one document collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionDescriptor {
    /// Challenge/test identifiers.
    #[serde(default)]
    pub challenge_info: ChallengeInfo,

    /// Ordered document list. Order defines the deterministic tie-break
    /// index used by the ranker.
    pub documents: Vec<DocumentEntry>,

    /// Declared user persona.
    pub persona: Persona,

    /// Declared task.
    pub job_to_be_done: JobToBeDone,
}

impl CollectionDescriptor {
    /// Parse a descriptor from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::Descriptor(e.to_string()))
    }

    /// A human-readable collection label for logs and errors.
    pub fn label(&self) -> &str {
        if !self.challenge_info.test_case_name.is_empty() {
            &self.challenge_info.test_case_name
        } else if !self.challenge_info.challenge_id.is_empty() {
            &self.challenge_info.challenge_id
        } else {
            "collection"
        }
    }
}

/// Challenge/test identifiers carried through to output metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChallengeInfo {
    /// Challenge identifier.
    #[serde(default)]
    pub challenge_id: String,

    /// Test case name.
    #[serde(default)]
    pub test_case_name: String,

    /// Free-form description, if present in the input.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One (filename, title) pair in a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentEntry {
    /// Source filename.
    pub filename: String,

    /// Declared document title.
    #[serde(default)]
    pub title: String,
}

/// The declared user persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Role label, e.g. "Travel Planner".
    pub role: String,
}

/// The declared task ("job to be done").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobToBeDone {
    /// Task text.
    pub task: String,
}
