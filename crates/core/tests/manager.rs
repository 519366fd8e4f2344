mod common;

use common::{
    FixtureCompiler, OWNABLE_PATH, OWNABLE_SOURCE, PAUSABLE_OUTPUT, PAUSABLE_PATH, PAUSABLE_SOURCE,
    SOLC_VERSION, TOKEN_OUTPUT, TOKEN_PATH, TOKEN_SOURCE, manager_with, path, select, token_output,
};
use solscope_api::{
    ApiError, LineColPosition, LineColRange, NavigationService, NodeType, SourceRange,
};
use solscope_core::runtime::{CompilerDiagnostic, FsImportResolver};
use solscope_core::{CompileStatus, ManagerConfig, SolidityManager, SolscopeError};
use std::path::PathBuf;
use std::sync::Arc;

#[test]
fn given_unchanged_content_when_recompiled_then_index_is_reused() {
    let compiler = FixtureCompiler::new(PAUSABLE_OUTPUT);
    let manager = manager_with(compiler.clone());
    let pausable = path(PAUSABLE_PATH);

    assert_eq!(manager.compile(PAUSABLE_SOURCE, pausable).unwrap(), CompileStatus::Indexed);
    let first = manager.file(pausable).unwrap();
    assert_eq!(manager.compile(PAUSABLE_SOURCE, pausable).unwrap(), CompileStatus::Cached);
    assert_eq!(compiler.calls(), 1);
    assert!(Arc::ptr_eq(&first, &manager.file(pausable).unwrap()));

    let edited = format!("{PAUSABLE_SOURCE}\n");
    assert_eq!(manager.compile(&edited, pausable).unwrap(), CompileStatus::Indexed);
    assert_eq!(compiler.calls(), 2);
    assert_eq!(manager.file(pausable).unwrap().content(), edited);
}

#[test]
fn given_cache_disabled_when_recompiled_then_compiler_runs_again() {
    let compiler = FixtureCompiler::new(PAUSABLE_OUTPUT);
    let manager = SolidityManager::builder()
        .with_config(ManagerConfig {
            use_cache: false,
            ..ManagerConfig::default()
        })
        .with_compiler(compiler.clone())
        .build();

    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();
    assert_eq!(compiler.calls(), 2);
}

#[test]
fn given_compiled_file_when_compile_if_not_compiled_then_skipped() {
    let compiler = FixtureCompiler::new(PAUSABLE_OUTPUT);
    let manager = manager_with(compiler.clone());

    assert!(!manager.is_compiled(path(PAUSABLE_PATH)));
    manager
        .compile_if_not_compiled(PAUSABLE_SOURCE, path(PAUSABLE_PATH))
        .unwrap();
    let status = manager
        .compile_if_not_compiled("contract Other {}", path(PAUSABLE_PATH))
        .unwrap();
    assert_eq!(status, CompileStatus::Cached);
    assert_eq!(compiler.calls(), 1);
    assert!(manager.is_compiled(path(PAUSABLE_PATH)));
}

#[test]
fn given_indexed_file_when_navigating_then_locations_carry_path_and_range() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();
    let use_site = select(PAUSABLE_SOURCE, "owner", 1);

    let definition = manager
        .goto_definition(path(PAUSABLE_PATH), &use_site)
        .unwrap()
        .unwrap();
    assert_eq!(definition.id, 12);
    assert_eq!(definition.name.as_deref(), Some("owner"));
    assert_eq!(definition.path, Some(PathBuf::from(PAUSABLE_PATH)));
    assert_eq!(
        definition.range,
        Some(LineColRange::new(
            LineColPosition::new(10, 5),
            LineColPosition::new(10, 31)
        ))
    );
    let lsp = definition.to_lsp(1).unwrap();
    assert_eq!((lsp.range.start.line, lsp.range.start.character), (9, 4));

    let type_definition = manager
        .goto_type_definition(path(PAUSABLE_PATH), &use_site)
        .unwrap()
        .unwrap();
    assert_eq!(type_definition.id, 9);
    assert_eq!(type_definition.node_type, NodeType::ElementaryTypeName);

    let references = manager
        .find_references(path(PAUSABLE_PATH), &select(PAUSABLE_SOURCE, "is_paused", 2))
        .unwrap();
    let ids: Vec<_> = references.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![33, 46, 56]);
    assert!(references.iter().all(|r| r.name.as_deref() == Some("is_paused")));
}

fn lsp_range(line: u32, start: u32, end: u32) -> LineColRange {
    LineColRange::from_lsp(
        lsp_types::Range::new(
            lsp_types::Position::new(line, start),
            lsp_types::Position::new(line, end),
        ),
        1,
    )
}

#[test]
fn given_lsp_selection_when_navigating_then_whole_token_resolves() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();

    // `require(msg.sender == owner);` on editor line 17.
    let owner_use = lsp_range(17, 30, 35);
    assert_eq!(owner_use, select(PAUSABLE_SOURCE, "owner", 1));
    let definition = manager
        .goto_definition(path(PAUSABLE_PATH), &owner_use)
        .unwrap()
        .unwrap();
    assert_eq!(definition.id, 12);
    let target = definition.to_lsp(1).unwrap();
    assert_eq!(
        target.range,
        lsp_types::Range::new(
            lsp_types::Position::new(9, 4),
            lsp_types::Position::new(9, 30)
        )
    );
    assert_eq!(target.uri.as_str(), "file:///w/Pausable.sol");

    // `is_paused = true;` on editor line 18.
    let references = manager
        .find_references(path(PAUSABLE_PATH), &lsp_range(18, 8, 17))
        .unwrap();
    let ids: Vec<_> = references.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![33, 46, 56]);

    let pragma = manager
        .ast_node_at_position(
            path(PAUSABLE_PATH),
            &LineColPosition::from_lsp(lsp_types::Position::new(0, 2), 1),
        )
        .unwrap()
        .unwrap();
    assert_eq!(pragma.id, 1);
    assert_eq!(pragma.node_type.as_str(), "PragmaDirective");
}

#[test]
fn given_miss_when_navigating_then_ok_and_empty() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();
    let blank = LineColRange::new(LineColPosition::new(2, 0), LineColPosition::new(2, 0));

    assert_eq!(manager.goto_definition(path(PAUSABLE_PATH), &blank).unwrap(), None);
    assert_eq!(manager.goto_type_definition(path(PAUSABLE_PATH), &blank).unwrap(), None);
    assert!(manager.find_references(path(PAUSABLE_PATH), &blank).unwrap().is_empty());

    let err = manager.goto_definition(path("/w/Other.sol"), &blank).unwrap_err();
    assert!(matches!(err, ApiError::UnknownFile(p) if p == PathBuf::from("/w/Other.sol")));
}

#[test]
fn given_position_when_ast_node_requested_then_tightest_node_returned() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();

    // Line 10 is `    address owner = msg.sender;`; column 6 is inside `address`.
    let node = manager
        .ast_node_at_position(path(PAUSABLE_PATH), &LineColPosition::new(10, 6))
        .unwrap()
        .unwrap();
    assert_eq!(node.id, 9);
    assert_eq!(
        manager
            .ast_node_at_position(path(PAUSABLE_PATH), &LineColPosition::new(0, 0))
            .unwrap(),
        None
    );
}

#[test]
fn given_src_when_text_requested_then_source_slice_returned() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();

    assert_eq!(
        manager.text_from_src(path(PAUSABLE_PATH), "129:26:0").unwrap().as_deref(),
        Some("address owner = msg.sender")
    );
    assert_eq!(
        manager
            .text_from_source_range(path(PAUSABLE_PATH), &SourceRange::new(129, 7, 0))
            .unwrap()
            .as_deref(),
        Some("address")
    );
    assert_eq!(
        manager.text_from_src(path(PAUSABLE_PATH), "0:5:7").unwrap(),
        None
    );
    assert!(matches!(
        manager.text_from_src(path(PAUSABLE_PATH), "garbage"),
        Err(ApiError::InvalidArgument(_))
    ));
    assert_eq!(
        manager
            .text_from_src(path(PAUSABLE_PATH), "9223372036854775807:1:0")
            .unwrap(),
        None
    );
}

#[test]
fn given_import_when_ingested_then_foreign_declaration_resolves() {
    let manager = SolidityManager::builder().build();
    let output = token_output();
    assert!(!output.has_errors());
    assert_eq!(output.errors.len(), 1);

    let status = manager
        .ingest(path(TOKEN_PATH), TOKEN_SOURCE, SOLC_VERSION, &output)
        .unwrap();
    assert_eq!(status, CompileStatus::Indexed);

    let token = manager.file(path(TOKEN_PATH)).unwrap();
    assert_eq!(token.file_index(), 1);
    assert_eq!(
        token.source_list(),
        &[Some(PathBuf::from(OWNABLE_PATH)), Some(PathBuf::from(TOKEN_PATH))]
    );

    let use_site = select(TOKEN_SOURCE, "owner", 0);
    let definition = manager
        .goto_definition(path(TOKEN_PATH), &use_site)
        .unwrap()
        .unwrap();
    assert_eq!(definition.id, 3);
    assert_eq!(definition.src, SourceRange::new(48, 20, 0));
    assert_eq!(definition.path, Some(PathBuf::from(OWNABLE_PATH)));
    // Ownable.sol itself is not indexed yet, so no line/column range.
    assert_eq!(definition.range, None);
    assert_eq!(
        manager.text_from_src(path(TOKEN_PATH), "48:20:0").unwrap(),
        None
    );

    manager
        .ingest(path(OWNABLE_PATH), OWNABLE_SOURCE, SOLC_VERSION, &output)
        .unwrap();
    let definition = manager
        .goto_definition(path(TOKEN_PATH), &use_site)
        .unwrap()
        .unwrap();
    assert_eq!(
        definition.range,
        Some(LineColRange::new(
            LineColPosition::new(4, 5),
            LineColPosition::new(4, 25)
        ))
    );
    assert_eq!(
        manager.text_from_src(path(TOKEN_PATH), "48:20:0").unwrap().as_deref(),
        Some("address public owner")
    );

    let type_definition = manager
        .goto_type_definition(path(TOKEN_PATH), &use_site)
        .unwrap()
        .unwrap();
    assert_eq!(type_definition.id, 2);
}

#[test]
fn given_error_diagnostic_when_ingested_then_recovered_ast_is_indexed() {
    let manager = SolidityManager::builder().build();
    let mut output = token_output();
    output.errors.push(CompilerDiagnostic {
        severity: "error".to_string(),
        kind: "TypeError".to_string(),
        message: "Undeclared identifier.".to_string(),
        formatted_message: None,
    });
    assert!(output.has_errors());

    let status = manager
        .ingest(path(TOKEN_PATH), TOKEN_SOURCE, SOLC_VERSION, &output)
        .unwrap();
    assert_eq!(status, CompileStatus::Indexed);
    assert!(manager.is_compiled(path(TOKEN_PATH)));
}

#[test]
fn given_imports_on_disk_when_compiled_then_resolver_supplies_them() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Ownable.sol"), OWNABLE_SOURCE).unwrap();

    let compiler = FixtureCompiler::with_imports(TOKEN_OUTPUT, &["Ownable.sol"]);
    let manager = SolidityManager::builder()
        .with_compiler(compiler.clone())
        .with_import_resolver(Arc::new(FsImportResolver::with_base(dir.path())))
        .build();
    let status = manager.compile(TOKEN_SOURCE, path(TOKEN_PATH)).unwrap();
    assert_eq!(status, CompileStatus::Indexed);

    let missing = SolidityManager::builder()
        .with_compiler(compiler)
        .with_import_resolver(Arc::new(FsImportResolver::with_base(
            dir.path().join("nowhere"),
        )))
        .build();
    let err = missing.compile(TOKEN_SOURCE, path(TOKEN_PATH)).unwrap_err();
    assert!(matches!(err, SolscopeError::Compiler(_)));
    assert!(!missing.is_compiled(path(TOKEN_PATH)));
}

#[test]
fn given_compiled_file_when_evicted_then_queries_report_unknown_file() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    manager.compile(PAUSABLE_SOURCE, path(PAUSABLE_PATH)).unwrap();
    assert_eq!(manager.files(), vec![PathBuf::from(PAUSABLE_PATH)]);

    assert!(manager.evict(path(PAUSABLE_PATH)).is_some());
    assert!(!manager.is_compiled(path(PAUSABLE_PATH)));
    assert!(matches!(
        manager.find_references(path(PAUSABLE_PATH), &LineColRange::default()),
        Err(ApiError::UnknownFile(_))
    ));
}

#[test]
fn given_path_missing_from_output_when_compiled_then_no_ast() {
    let manager = manager_with(FixtureCompiler::new(PAUSABLE_OUTPUT));
    let status = manager.compile("contract X {}", path("/w/X.sol")).unwrap();
    assert_eq!(status, CompileStatus::NoAst);
    assert!(!manager.is_compiled(path("/w/X.sol")));
}
