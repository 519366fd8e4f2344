use super::node_type::{NodeId, NodeType};
use super::position::LineColRange;
use super::range::SourceRange;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A navigation target: an AST node plus where it lives.
///
/// `path` and `range` are only filled in when the file that owns `src` is
/// indexed; a declaration imported from a file that was never compiled on
/// its own still reports its id and `src`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NodeLocation {
    pub id: NodeId,
    pub node_type: NodeType,
    pub name: Option<String>,
    pub src: SourceRange,
    pub path: Option<PathBuf>,
    pub range: Option<LineColRange>,
}

impl NodeLocation {
    /// LSP location, if both the file and its line/column range are known
    /// and the path is absolute.
    pub fn to_lsp(&self, origin: u32) -> Option<lsp_types::Location> {
        let path = self.path.as_ref()?;
        let range = self.range?;
        let url = url::Url::from_file_path(path).ok()?;
        let uri: lsp_types::Uri = url.as_str().parse().ok()?;
        Some(lsp_types::Location::new(uri, range.to_lsp(origin)))
    }
}
