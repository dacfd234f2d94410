use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utils::text::normalize_name;

/// A named entry in one `(type, category)` scope of the catalog.
///
/// Records carry no synthetic id: the normalized `name` is the sole
/// identity key within a scope. Fields beyond `name` and `description`
/// are preserved verbatim so the document round-trips untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Display name, unique by normalized form within its scope
    pub name: String,

    /// Free-text description
    pub description: String,

    /// Any additional fields carried by the document
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }

    /// The comparison key this record is identified by within its scope.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

/// An incoming request body proposed as a new or replacement record.
///
/// `name` and `description` stay optional here so schema validation can
/// distinguish a missing field from a too-short one and report the right
/// message; a candidate only becomes a [`Record`] once validation passes.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    pub name: Option<String>,
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    /// The candidate's comparison key; empty when no name was supplied.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.as_deref().map(normalize_name).unwrap_or_default()
    }
}
