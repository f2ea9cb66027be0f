// crates/identity-lib/src/error.rs

//! Central error type for the credential core.
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Identifier already registered")]
    Conflict,

    #[error("Identity not found")]
    NotFound,

    #[error("Invalid credentials")]
    Unauthorized,

    #[error("Credential hashing failed: {0}")]
    Hash(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Conflict => "AUTH_001",
            AppError::NotFound => "AUTH_002",
            AppError::Unauthorized => "AUTH_003",
            AppError::Hash(_) => "HASH_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
        }
    }

    /// Whether this is a terminal client outcome rather than an
    /// infrastructure failure. Client outcomes are never worth retrying.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::Conflict | AppError::NotFound | AppError::Unauthorized
        )
    }

    /// Get a sanitized message suitable for production use.
    ///
    /// Both verify-path failures (`NotFound`, `Unauthorized`) collapse into
    /// the same opaque string so a caller relaying it cannot be used to
    /// enumerate registered identifiers. The kinds stay distinct internally
    /// for logging and telemetry.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::Conflict => "Identifier already registered".to_string(),
            AppError::NotFound | AppError::Unauthorized => "Authentication failed".to_string(),
            AppError::Hash(_) => "An internal server error occurred".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::Io(_) => "Internal server error".to_string(),
            AppError::Json(_) => "Internal server error".to_string(),
        }
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
