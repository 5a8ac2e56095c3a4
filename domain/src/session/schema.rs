//! Structured-output constraint attached to a generation request.

use serde::{Deserialize, Serialize};

/// A named JSON schema the backend must constrain its output to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSchema {
    /// Schema name reported to the backend (e.g. "subtaskList")
    pub name: String,
    /// JSON Schema document
    pub schema: serde_json::Value,
    /// Whether the backend must follow the schema exactly
    pub strict: bool,
}

impl ResponseSchema {
    pub fn strict(name: impl Into<String>, schema: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }
}
