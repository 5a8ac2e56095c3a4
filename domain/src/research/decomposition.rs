//! Decomposition of a research plan into subtasks.
//!
//! The splitter model is asked for a JSON object constrained by
//! [`subtask_list_schema`]. Its answer goes through an explicit
//! parse-then-validate step: any entry that violates the schema fails the
//! whole batch, nothing is silently dropped or coerced.

use super::entities::Subtask;
use crate::session::schema::ResponseSchema;
use serde::Deserialize;
use std::collections::HashSet;
use thiserror::Error;

/// Name of the structured-output schema sent to the backend.
pub const SUBTASK_LIST_SCHEMA_NAME: &str = "subtaskList";

/// Errors produced while turning the splitter's output into subtasks
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecompositionError {
    #[error("Decomposition response is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("Decomposition response violates the subtask schema: {0}")]
    SchemaViolation(String),

    #[error("Subtask #{index} has an empty `{field}`")]
    EmptyField { index: usize, field: &'static str },

    #[error("Duplicate subtask id: {0}")]
    DuplicateId(String),

    #[error("Decomposition produced no subtasks")]
    NoSubtasks,
}

#[derive(Debug, Deserialize)]
struct RawSubtask {
    id: String,
    title: String,
    description: String,
}

/// JSON schema of the object the splitter must return.
///
/// ```json
/// {
///   "subtasks": [
///     { "id": "A", "title": "...", "description": "..." }
///   ]
/// }
/// ```
pub fn subtask_list_schema() -> ResponseSchema {
    let subtask = serde_json::json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "string",
                "description": "Short identifier for the subtask (e.g. 'A', 'history', 'drivers')."
            },
            "title": {
                "type": "string",
                "description": "Short descriptive title of the subtask."
            },
            "description": {
                "type": "string",
                "description": "Clear, detailed instructions for the sub-agent that will research this subtask."
            }
        },
        "required": ["id", "title", "description"],
        "additionalProperties": false
    });

    ResponseSchema::strict(
        SUBTASK_LIST_SCHEMA_NAME,
        serde_json::json!({
            "type": "object",
            "properties": {
                "subtasks": {
                    "type": "array",
                    "description": "List of subtasks that together cover the whole research plan.",
                    "items": subtask
                }
            },
            "required": ["subtasks"],
            "additionalProperties": false
        }),
    )
}

/// Parse and validate the splitter's response text into subtasks.
///
/// A surrounding markdown code fence (` ```json ... ``` `) is tolerated.
/// Order of the returned subtasks is the order of the response.
pub fn parse_subtask_list(response: &str) -> Result<Vec<Subtask>, DecompositionError> {
    let body = strip_code_fence(response);

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| DecompositionError::InvalidJson(e.to_string()))?;

    let entries = value
        .get("subtasks")
        .ok_or_else(|| {
            DecompositionError::SchemaViolation("missing `subtasks` field".to_string())
        })?
        .as_array()
        .ok_or_else(|| {
            DecompositionError::SchemaViolation("`subtasks` is not an array".to_string())
        })?;

    if entries.is_empty() {
        return Err(DecompositionError::NoSubtasks);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let mut subtasks = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let raw: RawSubtask = serde_json::from_value(entry.clone()).map_err(|e| {
            DecompositionError::SchemaViolation(format!("subtask #{}: {}", index, e))
        })?;

        for (field, value) in [
            ("id", &raw.id),
            ("title", &raw.title),
            ("description", &raw.description),
        ] {
            if value.trim().is_empty() {
                return Err(DecompositionError::EmptyField { index, field });
            }
        }

        let id = raw.id.trim().to_string();
        if !seen.insert(id.clone()) {
            return Err(DecompositionError::DuplicateId(id));
        }

        subtasks.push(Subtask::new(id, raw.title.trim(), raw.description.trim()));
    }

    Ok(subtasks)
}

/// Remove a single surrounding markdown code fence, if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. "json") on the opening fence line
    match body.find('\n') {
        Some(newline) => body[newline + 1..].trim(),
        None => body.trim(),
    }
}
