use super::raw::{ChildRef, NON_STRUCTURAL_FIELDS, RawNode};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use solscope_api::{NodeId, NodeType, SourceRange};

/// An indexed AST node.
///
/// Nodes live in an id-keyed arena (see `StaticInfo`); `parent` and
/// `children` are ids into that arena, never owning links.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub id: NodeId,
    pub node_type: NodeType,
    pub src: SourceRange,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Enclosing contract, stamped on nodes that open a naming context.
    pub contract_name: Option<String>,
    /// Enclosing function or event, stamped like `contract_name`.
    pub function_name: Option<String>,
    child_fields: IndexMap<String, Vec<NodeId>>,
    attributes: Map<String, Value>,
}

impl AstNode {
    pub(crate) fn from_raw(
        raw: RawNode<'_>,
        src: SourceRange,
        parent: Option<NodeId>,
        children: &[ChildRef<'_>],
    ) -> Self {
        let mut child_fields: IndexMap<String, Vec<NodeId>> = IndexMap::new();
        for child in children {
            child_fields
                .entry(child.field.to_string())
                .or_default()
                .push(child.node.id());
        }

        let attributes = raw
            .fields()
            .iter()
            .filter(|(field, _)| {
                let field = field.as_str();
                NON_STRUCTURAL_FIELDS.contains(&field) || !child_fields.contains_key(field)
            })
            .filter(|(field, _)| !matches!(field.as_str(), "id" | "src" | "nodeType"))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();

        Self {
            id: raw.id(),
            node_type: NodeType::from(raw.node_type()),
            src,
            parent,
            children: children.iter().map(|c| c.node.id()).collect(),
            contract_name: None,
            function_name: None,
            child_fields,
            attributes,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    /// Scalar and metadata fields, i.e. everything that is not a child node.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn attribute(&self, field: &str) -> Option<&Value> {
        self.attributes.get(field)
    }

    /// Ids of the child nodes found under `field`, in source order.
    pub fn child_field(&self, field: &str) -> &[NodeId] {
        self.child_fields
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The declaration this node refers to. A `null` reference counts as none.
    pub fn referenced_declaration(&self) -> Option<NodeId> {
        self.attributes
            .get("referencedDeclaration")
            .and_then(Value::as_i64)
    }

    /// Id of the `typeName` sub-node of a declaration.
    pub fn type_name(&self) -> Option<NodeId> {
        self.child_field("typeName").first().copied()
    }

    pub fn members(&self) -> &[NodeId] {
        self.child_field("members")
    }

    /// `typeDescriptions.typeString`
    pub fn type_string(&self) -> Option<&str> {
        self.attributes
            .get("typeDescriptions")
            .and_then(|d| d.get("typeString"))
            .and_then(Value::as_str)
    }
}
