//! Per-file index over a compiled AST.

pub mod callbacks;
pub mod spatial;
pub mod symbols;

pub use callbacks::WalkScope;
pub use spatial::{StartIdPair, StartOffsetIndex};
pub use symbols::{Param, Signature, SymbolTables};

use crate::ast::{AstNode, AstVisitor, ChildRef, RawNode, walk};
use crate::error::{Result, SolscopeError};
use serde_json::Value;
use solscope_api::{NodeId, NodeType, SourceRange};
use std::collections::HashMap;

/// Everything derived from one AST in a single walk.
///
/// Immutable once built, apart from [`StaticInfo::merge_ids`].
#[derive(Debug, Clone)]
pub struct StaticInfo {
    root: NodeId,
    solc_ids: HashMap<NodeId, AstNode>,
    start_offset: StartOffsetIndex,
    id2uses: HashMap<NodeId, Vec<NodeId>>,
    symbols: SymbolTables,
}

impl StaticInfo {
    pub fn build(ast: &Value) -> Result<Self> {
        let mut indexer = Indexer::default();
        let visited = walk(ast, &mut indexer)?;
        let Indexer {
            root,
            solc_ids,
            mut start_offset,
            id2uses,
            symbols,
        } = indexer;
        start_offset.finish();

        tracing::debug!(
            nodes = visited,
            starts = start_offset.starts().len(),
            declarations_used = id2uses.len(),
            "Indexed AST"
        );

        Ok(Self {
            root: root.ok_or_else(|| SolscopeError::Internal("walk produced no root".into()))?,
            solc_ids,
            start_offset,
            id2uses,
            symbols,
        })
    }

    pub fn from_json(ast: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(ast)?;
        Self::build(&value)
    }

    pub fn root(&self) -> Option<&AstNode> {
        self.solc_ids.get(&self.root)
    }

    pub fn node(&self, id: NodeId) -> Option<&AstNode> {
        self.solc_ids.get(&id)
    }

    pub fn solc_ids(&self) -> &HashMap<NodeId, AstNode> {
        &self.solc_ids
    }

    pub fn len(&self) -> usize {
        self.solc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solc_ids.is_empty()
    }

    pub fn start_offsets(&self) -> &StartOffsetIndex {
        &self.start_offset
    }

    /// Referencing node ids per declaration id, in encounter order.
    pub fn id2uses(&self) -> &HashMap<NodeId, Vec<NodeId>> {
        &self.id2uses
    }

    /// Nodes referring to `declaration`; empty if it is never used.
    pub fn uses_of(&self, declaration: NodeId) -> Vec<&AstNode> {
        self.id2uses
            .get(&declaration)
            .map(|uses| uses.iter().filter_map(|id| self.solc_ids.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Tightest node containing byte `offset`.
    pub fn offset_to_ast_node(&self, offset: usize) -> Option<&AstNode> {
        self.start_offset
            .at_offset(offset)
            .and_then(|id| self.solc_ids.get(&id))
    }

    /// Tightest node containing all of `range`.
    pub fn range_to_ast_node(&self, range: &SourceRange) -> Option<&AstNode> {
        self.start_offset
            .at_range(range)
            .and_then(|id| self.solc_ids.get(&id))
    }

    /// Nodes whose `src` has exactly the start and length of `range`.
    pub fn nodes_at_range(
        &self,
        range: &SourceRange,
        node_type: Option<&NodeType>,
    ) -> Vec<&AstNode> {
        if !range.is_valid() {
            return Vec::new();
        }
        self.start_offset
            .bucket(range.start as usize)
            .iter()
            .filter(|pair| pair.length as i64 == range.length)
            .filter_map(|pair| self.solc_ids.get(&pair.id))
            .filter(|node| node_type.is_none_or(|t| &node.node_type == t))
            .collect()
    }

    /// Copy every node of `other` into this index so references into the
    /// other file resolve. Existing entries with the same id are replaced.
    pub fn merge_ids(&mut self, other: &StaticInfo) {
        self.solc_ids.extend(
            other
                .solc_ids
                .iter()
                .map(|(id, node)| (*id, node.clone())),
        );
    }
}

#[derive(Default)]
struct Indexer {
    root: Option<NodeId>,
    solc_ids: HashMap<NodeId, AstNode>,
    start_offset: StartOffsetIndex,
    id2uses: HashMap<NodeId, Vec<NodeId>>,
    symbols: SymbolTables,
}

impl<'a> AstVisitor<'a> for Indexer {
    type Scope = WalkScope;

    fn enter(
        &mut self,
        node: RawNode<'a>,
        parent: Option<RawNode<'a>>,
        scope: &WalkScope,
    ) -> Result<WalkScope> {
        if parent.is_none() {
            self.root = Some(node.id());
        }
        let node_type = NodeType::from(node.node_type());
        Ok(match callbacks::pre_handler(&node_type) {
            Some(handler) => handler(&mut self.symbols, node, scope),
            None => scope.clone(),
        })
    }

    fn leave(
        &mut self,
        node: RawNode<'a>,
        parent: Option<RawNode<'a>>,
        children: &[ChildRef<'a>],
        scope: &WalkScope,
    ) -> Result<()> {
        let src = SourceRange::parse(node.src())?;
        self.start_offset.insert(&src, node.id());

        let mut indexed = AstNode::from_raw(node, src, parent.map(|p| p.id()), children);
        if callbacks::pre_handler(&indexed.node_type).is_some() {
            indexed.contract_name = scope.contract_name.clone();
            indexed.function_name = scope.function_name.clone();
        }
        if let Some(declaration) = indexed.referenced_declaration() {
            self.id2uses.entry(declaration).or_default().push(node.id());
        }
        if let Some(handler) = callbacks::post_handler(&indexed.node_type) {
            handler(&mut self.symbols, node, parent, scope);
        }
        callbacks::detect_bytes(&mut self.symbols, node, parent);

        if self.solc_ids.insert(node.id(), indexed).is_some() {
            return Err(SolscopeError::MalformedAst(format!(
                "duplicate node id {}",
                node.id()
            )));
        }
        Ok(())
    }
}
