use solscope_api::{ApiError, SrcParseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Malformed AST: {0}")]
    MalformedAst(String),
    #[error(transparent)]
    Src(#[from] SrcParseError),
    #[error("Compiler error: {0}")]
    Compiler(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for SolscopeError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        SolscopeError::Compiler(err.to_string())
    }
}

impl From<SolscopeError> for ApiError {
    fn from(err: SolscopeError) -> Self {
        match err {
            SolscopeError::Src(e) => ApiError::InvalidArgument(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SolscopeError>;
