//! Depth-first traversal over a solc JSON AST.
//!
//! Children are discovered structurally (see [`RawNode::children`]), so no
//! per-version schema is needed. A visitor sees every node twice:
//!
//! - `enter` runs before the children and returns the scope they will see,
//!   which is how context such as the enclosing contract flows downward.
//! - `leave` runs after all children, with the parent and the child list at
//!   hand, which is where per-node bookkeeping happens.
//!
//! Recursion depth is not bounded; compiler ASTs are shallow enough in
//! practice.

use super::raw::{ChildRef, RawNode};
use crate::error::{Result, SolscopeError};
use serde_json::Value;

pub trait AstVisitor<'a> {
    /// Context handed from a node to its children.
    type Scope: Clone + Default;

    fn enter(
        &mut self,
        _node: RawNode<'a>,
        _parent: Option<RawNode<'a>>,
        scope: &Self::Scope,
    ) -> Result<Self::Scope> {
        Ok(scope.clone())
    }

    /// `scope` is the one `enter` returned for this node.
    fn leave(
        &mut self,
        _node: RawNode<'a>,
        _parent: Option<RawNode<'a>>,
        _children: &[ChildRef<'a>],
        _scope: &Self::Scope,
    ) -> Result<()> {
        Ok(())
    }
}

/// Walk `root` and return the number of nodes visited.
///
/// Fails with [`SolscopeError::MalformedAst`] if `root` lacks an integer
/// `id`, a `nodeType` or a `src`. Errors raised by the visitor abort the walk.
pub fn walk<'a, V: AstVisitor<'a>>(root: &'a Value, visitor: &mut V) -> Result<usize> {
    let node = RawNode::from_value(root).ok_or_else(|| {
        SolscopeError::MalformedAst(
            "root must be an object with `id`, `nodeType` and `src`".to_string(),
        )
    })?;
    let mut visited = 0;
    walk_node(node, None, &V::Scope::default(), visitor, &mut visited)?;
    Ok(visited)
}

fn walk_node<'a, V: AstVisitor<'a>>(
    node: RawNode<'a>,
    parent: Option<RawNode<'a>>,
    scope: &V::Scope,
    visitor: &mut V,
    visited: &mut usize,
) -> Result<()> {
    *visited += 1;
    let inner = visitor.enter(node, parent, scope)?;
    let children = node.children();
    for child in &children {
        walk_node(child.node, Some(node), &inner, visitor, visited)?;
    }
    visitor.leave(node, parent, &children, &inner)
}
