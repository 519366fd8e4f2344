//! Per-node-type handlers run while a [`StaticInfo`](super::StaticInfo) is built.
//!
//! Pre-order handlers open a naming context and return the scope the node's
//! descendants see. Post-order handlers fill the symbol tables once a node's
//! children are known.

use super::symbols::{Param, Signature, SymbolTables};
use crate::ast::RawNode;
use solscope_api::NodeType;

/// Names of the enclosing contract and function or event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkScope {
    pub contract_name: Option<String>,
    pub function_name: Option<String>,
}

impl WalkScope {
    /// `Contract.name`, with empty segments for missing names.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}.{}", self.contract_name.as_deref().unwrap_or_default(), name)
    }
}

pub type PreHandler = fn(&mut SymbolTables, RawNode<'_>, &WalkScope) -> WalkScope;
pub type PostHandler = fn(&mut SymbolTables, RawNode<'_>, Option<RawNode<'_>>, &WalkScope);

pub fn pre_handler(node_type: &NodeType) -> Option<PreHandler> {
    match node_type {
        NodeType::ContractDefinition => Some(enter_contract),
        NodeType::FunctionDefinition => Some(enter_function),
        NodeType::EventDefinition => Some(enter_event),
        _ => None,
    }
}

pub fn post_handler(node_type: &NodeType) -> Option<PostHandler> {
    match node_type {
        NodeType::VariableDeclaration => Some(record_variable),
        NodeType::ArrayTypeName => Some(record_array),
        NodeType::EnumDefinition => Some(record_enum),
        NodeType::StructDefinition => Some(record_struct),
        _ => None,
    }
}

/// Runs for every node: a `bytes` type name directly under a variable
/// declaration marks that variable.
pub fn detect_bytes(tables: &mut SymbolTables, node: RawNode<'_>, parent: Option<RawNode<'_>>) {
    if node.name() != Some("bytes") {
        return;
    }
    if let Some(name) = declared_variable(parent) {
        tables.bytes.insert(name.to_string());
    }
}

fn enter_contract(tables: &mut SymbolTables, node: RawNode<'_>, _scope: &WalkScope) -> WalkScope {
    let name = node.name().unwrap_or_default();
    record_name(tables, node, name);
    WalkScope {
        contract_name: Some(name.to_string()),
        function_name: None,
    }
}

fn enter_function(tables: &mut SymbolTables, node: RawNode<'_>, scope: &WalkScope) -> WalkScope {
    let (inner, key) = enter_callable(tables, node, scope);
    tables.fns.insert(key, signature(node));
    inner
}

fn enter_event(tables: &mut SymbolTables, node: RawNode<'_>, scope: &WalkScope) -> WalkScope {
    let (inner, key) = enter_callable(tables, node, scope);
    tables.events.insert(key, signature(node));
    inner
}

fn enter_callable(
    tables: &mut SymbolTables,
    node: RawNode<'_>,
    scope: &WalkScope,
) -> (WalkScope, String) {
    let name = node.name().unwrap_or_default();
    record_name(tables, node, name);
    let inner = WalkScope {
        contract_name: scope.contract_name.clone(),
        function_name: Some(name.to_string()),
    };
    (inner, scope.qualify(name))
}

fn record_name(tables: &mut SymbolTables, node: RawNode<'_>, name: &str) {
    tables
        .node_type_names
        .entry(NodeType::from(node.node_type()))
        .or_default()
        .insert(name.to_string());
}

fn signature(node: RawNode<'_>) -> Signature {
    Signature {
        params: params(node, "parameters"),
        returns: params(node, "returnParameters"),
    }
}

fn params(node: RawNode<'_>, field: &str) -> Vec<Param> {
    node.child(field)
        .map(|list| list.child_list("parameters"))
        .unwrap_or_default()
        .into_iter()
        .map(|param| Param {
            name: param.name().unwrap_or_default().to_string(),
            type_name: param_type(param),
        })
        .collect()
}

// Written type first (`uint`), then the resolved one (`uint256`).
fn param_type(param: RawNode<'_>) -> String {
    let type_name = param.child("typeName");
    type_name
        .and_then(|t| t.name())
        .or_else(|| type_name.and_then(|t| t.type_string()))
        .or_else(|| param.type_string())
        .unwrap_or_default()
        .to_string()
}

fn record_variable(
    tables: &mut SymbolTables,
    node: RawNode<'_>,
    _parent: Option<RawNode<'_>>,
    scope: &WalkScope,
) {
    let Some(name) = node.name() else {
        return;
    };
    let key = format!(
        "{}.{}.{}",
        scope.contract_name.as_deref().unwrap_or_default(),
        scope.function_name.as_deref().unwrap_or_default(),
        name
    );
    let type_string = node.type_string().unwrap_or_default().to_string();
    tables.vars.insert(key, type_string);
}

fn record_array(
    tables: &mut SymbolTables,
    _node: RawNode<'_>,
    parent: Option<RawNode<'_>>,
    _scope: &WalkScope,
) {
    if let Some(name) = declared_variable(parent) {
        tables.arrays.insert(name.to_string());
    }
}

fn record_enum(
    tables: &mut SymbolTables,
    node: RawNode<'_>,
    _parent: Option<RawNode<'_>>,
    _scope: &WalkScope,
) {
    if let Some(name) = node.name() {
        tables.enums.insert(name.to_string(), member_names(node));
    }
}

fn record_struct(
    tables: &mut SymbolTables,
    node: RawNode<'_>,
    _parent: Option<RawNode<'_>>,
    _scope: &WalkScope,
) {
    if let Some(name) = node.name() {
        tables.structs.insert(name.to_string(), member_names(node));
    }
}

fn member_names(node: RawNode<'_>) -> Vec<String> {
    node.child_list("members")
        .into_iter()
        .filter_map(|member| member.name().map(str::to_string))
        .collect()
}

fn declared_variable<'a>(parent: Option<RawNode<'a>>) -> Option<&'a str> {
    parent
        .filter(|p| p.node_type() == NodeType::VariableDeclaration.as_str())
        .and_then(|p| p.name())
}
