use crate::error::ApiResult;
use crate::models::{LineColRange, NodeLocation};
use std::path::Path;

/// Semantic navigation over compiled Solidity files.
///
/// This is the surface an editor protocol adapter binds to its own
/// request/response framework. Selections use the implementation's
/// configured line/column origin.
///
/// # Results
/// - `Err(ApiError::UnknownFile)` - `path` was never indexed
/// - `Ok(None)` / `Ok(vec![])` - the selection is valid but nothing resolves
///   there (whitespace, a node without a cross-reference, ...)
pub trait NavigationService: Send + Sync {
    /// Declaration referenced by the node under `selection`.
    fn goto_definition(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Option<NodeLocation>>;

    /// Type annotation of the declaration referenced under `selection`, or
    /// the declaration itself when it has none.
    fn goto_type_definition(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Option<NodeLocation>>;

    /// Every use of the declaration under `selection`, in AST encounter order.
    fn find_references(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Vec<NodeLocation>>;
}
