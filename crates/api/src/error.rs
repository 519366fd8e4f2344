use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("File not indexed: {}", .0.display())]
    UnknownFile(PathBuf),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A solc `src` attribute that is not `start:length:fileIndex`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid source range {src:?}: expected `start:length:fileIndex`")]
pub struct SrcParseError {
    pub src: String,
}

impl SrcParseError {
    pub fn new(src: impl Into<String>) -> Self {
        Self { src: src.into() }
    }
}
