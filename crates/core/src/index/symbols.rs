use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use solscope_api::NodeType;

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}

/// Parameters and return values of a function or event.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Param>,
    pub returns: Vec<Param>,
}

/// Name-keyed tables derived while indexing one AST.
///
/// Qualified keys join names with `.`: `Contract.fn` for signatures and
/// `Contract.fn.var` for variables (state variables leave `fn` empty).
#[derive(Serialize, Debug, Clone, Default)]
pub struct SymbolTables {
    /// Enum name to its values, in declaration order.
    pub enums: IndexMap<String, Vec<String>>,
    /// Struct name to its member names.
    pub structs: IndexMap<String, Vec<String>>,
    /// Variables declared with an array type.
    pub arrays: IndexSet<String>,
    /// Variables declared as `bytes`.
    pub bytes: IndexSet<String>,
    pub events: IndexMap<String, Signature>,
    pub fns: IndexMap<String, Signature>,
    pub vars: IndexMap<String, String>,
    /// Declared names per scoping node type, e.g. every contract name.
    pub node_type_names: IndexMap<NodeType, IndexSet<String>>,
}

impl SymbolTables {
    pub fn names_of(&self, node_type: &NodeType) -> Option<&IndexSet<String>> {
        self.node_type_names.get(node_type)
    }

    pub fn signature(&self, qualified_name: &str) -> Option<&Signature> {
        self.fns
            .get(qualified_name)
            .or_else(|| self.events.get(qualified_name))
    }
}
