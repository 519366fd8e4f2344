pub mod error;
pub mod models;
pub mod navigation;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, SrcParseError};
pub use models::*;
pub use navigation::NavigationService;
