//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Unknown model role: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_display() {
        let error = DomainError::InvalidQuery("query cannot be empty".to_string());
        assert_eq!(error.to_string(), "Invalid query: query cannot be empty");
    }

    #[test]
    fn test_unknown_role_display() {
        let error = DomainError::UnknownRole("editor".to_string());
        assert_eq!(error.to_string(), "Unknown model role: editor");
    }
}
