//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown request shape: {0}")]
    UnknownRequestShape(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_question_display() {
        let error = DomainError::InvalidQuestion("question is empty".to_string());
        assert_eq!(error.to_string(), "Invalid question: question is empty");
    }

    #[test]
    fn test_unknown_shape_display() {
        let error = DomainError::UnknownRequestShape("soap".to_string());
        assert_eq!(error.to_string(), "Unknown request shape: soap");
    }
}
