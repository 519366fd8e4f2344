//! Borrowed view over a node of the compiler's JSON AST.

use serde_json::{Map, Value};
use solscope_api::NodeId;

/// Fields that never hold child nodes: the three every node carries, known
/// scalar attributes, and the back-links some consumers add.
pub const NON_STRUCTURAL_FIELDS: &[&str] = &[
    "id",
    "src",
    "nodeType",
    "operator",
    "type",
    "constant",
    "name",
    "absolutePath",
    "children",
    "parent",
];

/// A JSON object that has an integer `id`, a string `nodeType` and a string
/// `src`.
#[derive(Debug, Clone, Copy)]
pub struct RawNode<'a> {
    fields: &'a Map<String, Value>,
    id: NodeId,
    node_type: &'a str,
    src: &'a str,
}

/// A structural child together with the field it was found under.
#[derive(Debug, Clone, Copy)]
pub struct ChildRef<'a> {
    pub field: &'a str,
    pub node: RawNode<'a>,
}

impl<'a> RawNode<'a> {
    /// `None` unless `value` is a well-formed AST node.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let fields = value.as_object()?;
        Some(Self {
            id: fields.get("id")?.as_i64()?,
            node_type: fields.get("nodeType")?.as_str()?,
            src: fields.get("src")?.as_str()?,
            fields,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn node_type(&self) -> &'a str {
        self.node_type
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn fields(&self) -> &'a Map<String, Value> {
        self.fields
    }

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.get("name").and_then(Value::as_str)
    }

    /// `typeDescriptions.typeString`
    pub fn type_string(&self) -> Option<&'a str> {
        self.get("typeDescriptions")
            .and_then(|d| d.get("typeString"))
            .and_then(Value::as_str)
    }

    /// The node stored directly under `field`.
    pub fn child(&self, field: &str) -> Option<RawNode<'a>> {
        self.get(field).and_then(RawNode::from_value)
    }

    /// The nodes stored in the array under `field`; non-node entries are skipped.
    pub fn child_list(&self, field: &str) -> Vec<RawNode<'a>> {
        self.get(field)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(RawNode::from_value).collect())
            .unwrap_or_default()
    }

    /// Structural children in field order, then array order.
    ///
    /// Any field holding a node, or an array containing nodes, contributes;
    /// [`NON_STRUCTURAL_FIELDS`] are skipped.
    pub fn children(&self) -> Vec<ChildRef<'a>> {
        let mut children = Vec::new();
        for (field, value) in self.fields {
            if NON_STRUCTURAL_FIELDS.contains(&field.as_str()) {
                continue;
            }
            match value {
                Value::Object(_) => {
                    if let Some(node) = RawNode::from_value(value) {
                        children.push(ChildRef { field, node });
                    }
                }
                Value::Array(items) => {
                    children.extend(
                        items
                            .iter()
                            .filter_map(RawNode::from_value)
                            .map(|node| ChildRef { field, node }),
                    );
                }
                _ => {}
            }
        }
        children
    }
}
