use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the compiler assigns to every AST node.
///
/// Unique within one compilation. Negative ids denote built-in declarations
/// (`msg`, `require`, ...) that have no node in any source unit.
pub type NodeId = i64;

/// The `nodeType` tag of a solc AST node.
///
/// Only the tags the index reacts to get their own variant; everything else
/// is carried verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    SourceUnit,
    ContractDefinition,
    FunctionDefinition,
    EventDefinition,
    ModifierDefinition,
    VariableDeclaration,
    ParameterList,
    ElementaryTypeName,
    ArrayTypeName,
    UserDefinedTypeName,
    EnumDefinition,
    EnumValue,
    StructDefinition,
    Identifier,
    MemberAccess,
    Other(String),
}

impl NodeType {
    pub fn as_str(&self) -> &str {
        match self {
            NodeType::SourceUnit => "SourceUnit",
            NodeType::ContractDefinition => "ContractDefinition",
            NodeType::FunctionDefinition => "FunctionDefinition",
            NodeType::EventDefinition => "EventDefinition",
            NodeType::ModifierDefinition => "ModifierDefinition",
            NodeType::VariableDeclaration => "VariableDeclaration",
            NodeType::ParameterList => "ParameterList",
            NodeType::ElementaryTypeName => "ElementaryTypeName",
            NodeType::ArrayTypeName => "ArrayTypeName",
            NodeType::UserDefinedTypeName => "UserDefinedTypeName",
            NodeType::EnumDefinition => "EnumDefinition",
            NodeType::EnumValue => "EnumValue",
            NodeType::StructDefinition => "StructDefinition",
            NodeType::Identifier => "Identifier",
            NodeType::MemberAccess => "MemberAccess",
            NodeType::Other(s) => s,
        }
    }

    /// Declarations whose "type" is really a call signature.
    pub fn is_signature(&self) -> bool {
        matches!(self, NodeType::FunctionDefinition | NodeType::EventDefinition)
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        match s {
            "SourceUnit" => NodeType::SourceUnit,
            "ContractDefinition" => NodeType::ContractDefinition,
            "FunctionDefinition" => NodeType::FunctionDefinition,
            "EventDefinition" => NodeType::EventDefinition,
            "ModifierDefinition" => NodeType::ModifierDefinition,
            "VariableDeclaration" => NodeType::VariableDeclaration,
            "ParameterList" => NodeType::ParameterList,
            "ElementaryTypeName" => NodeType::ElementaryTypeName,
            "ArrayTypeName" => NodeType::ArrayTypeName,
            "UserDefinedTypeName" => NodeType::UserDefinedTypeName,
            "EnumDefinition" => NodeType::EnumDefinition,
            "EnumValue" => NodeType::EnumValue,
            "StructDefinition" => NodeType::StructDefinition,
            "Identifier" => NodeType::Identifier,
            "MemberAccess" => NodeType::MemberAccess,
            other => NodeType::Other(other.to_string()),
        }
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        NodeType::from(s.as_str())
    }
}

impl From<NodeType> for String {
    fn from(value: NodeType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl AsRef<str> for NodeType {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
