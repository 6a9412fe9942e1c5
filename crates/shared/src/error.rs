use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotFound,
    Validation,
    Internal,
}

/// Server-reported failure, classified from the GraphQL error message so
/// callers can branch without string matching of their own.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Classify a raw GraphQL error message. The schema raises plain
    /// exceptions ("Organization not found"), so this is heuristic.
    pub fn from_server_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let code = if lower.contains("not found") {
            ErrorCode::NotFound
        } else if lower.contains("required") || lower.contains("invalid") {
            ErrorCode::Validation
        } else {
            ErrorCode::Internal
        };
        Self { code, message }
    }
}
