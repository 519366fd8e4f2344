use crate::ast::AstNode;
use crate::index::StaticInfo;
use crate::model::SolidityFile;
use solscope_api::{LineColRange, NodeType};

/// Tightest AST node enclosing `selection`.
pub fn node_at_selection<'f>(
    file: &'f SolidityFile,
    selection: &LineColRange,
) -> Option<&'f AstNode> {
    let range = file.source_range(selection)?;
    file.static_info().range_to_ast_node(&range)
}

/// Declaration referenced by the node under `selection`.
pub fn get_definition<'f>(file: &'f SolidityFile, selection: &LineColRange) -> Option<&'f AstNode> {
    let node = node_at_selection(file, selection)?;
    definition_of(file.static_info(), node)
}

/// Type annotation of the declaration referenced under `selection`, falling
/// back to the declaration itself.
pub fn get_type_definition<'f>(
    file: &'f SolidityFile,
    selection: &LineColRange,
) -> Option<&'f AstNode> {
    let node = node_at_selection(file, selection)?;
    type_definition_of(file.static_info(), node)
}

/// Same lookup as [`get_type_definition`]. A `FunctionDefinition` or
/// `EventDefinition` result is a call signature rather than a type.
pub fn get_signature<'f>(file: &'f SolidityFile, selection: &LineColRange) -> Option<&'f AstNode> {
    get_type_definition(file, selection)
}

/// Uses of the declaration under `selection`, in AST encounter order.
///
/// `Some(vec![])` means a declaration was found but is never used.
pub fn get_references<'f>(
    file: &'f SolidityFile,
    selection: &LineColRange,
) -> Option<Vec<&'f AstNode>> {
    let node = node_at_selection(file, selection)?;
    references_of(file.static_info(), node)
}

pub fn definition_of<'i>(info: &'i StaticInfo, node: &AstNode) -> Option<&'i AstNode> {
    info.node(node.referenced_declaration()?)
}

pub fn type_definition_of<'i>(info: &'i StaticInfo, node: &AstNode) -> Option<&'i AstNode> {
    let declaration = definition_of(info, node)?;
    match declaration.type_name() {
        Some(type_name) => info.node(type_name).or(Some(declaration)),
        None => Some(declaration),
    }
}

pub fn references_of<'i>(info: &'i StaticInfo, node: &AstNode) -> Option<Vec<&'i AstNode>> {
    let target = match node.referenced_declaration() {
        Some(declaration) => declaration,
        None if node.node_type == NodeType::VariableDeclaration => node.id,
        None => return None,
    };
    Some(info.uses_of(target))
}
