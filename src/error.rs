use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, AblationError>;

/// Errors raised while building simulation parameters.
///
/// The kernel functions never return these; they are total and leave
/// precondition checks to the caller.
#[derive(Debug, Error)]
pub enum AblationError {
    /// A configuration or fragment parameter is out of its physical range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Configuration file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid JSON for the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<&str> for AblationError {
    fn from(msg: &str) -> Self {
        AblationError::InvalidParameter(msg.to_string())
    }
}

impl From<String> for AblationError {
    fn from(msg: String) -> Self {
        AblationError::InvalidParameter(msg)
    }
}
