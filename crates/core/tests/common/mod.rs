use serde_json::Value;
use solscope_api::{LineColPosition, LineColRange};
use solscope_core::runtime::{BoxError, Compiler, CompilerOutput, ImportResolver};
use solscope_core::{SolidityFile, SolidityManager, StaticInfo};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const PAUSABLE_PATH: &str = "/w/Pausable.sol";
pub const PAUSABLE_SOURCE: &str = include_str!("../fixtures/Pausable.sol");
pub const PAUSABLE_OUTPUT: &str = include_str!("../fixtures/pausable_output.json");

pub const OWNABLE_PATH: &str = "/w/Ownable.sol";
pub const OWNABLE_SOURCE: &str = include_str!("../fixtures/Ownable.sol");
pub const TOKEN_PATH: &str = "/w/Token.sol";
pub const TOKEN_SOURCE: &str = include_str!("../fixtures/Token.sol");
pub const TOKEN_OUTPUT: &str = include_str!("../fixtures/token_output.json");

pub const SOLC_VERSION: &str = "0.8.19+commit.7dd6d404";

#[allow(dead_code)]
pub fn pausable_ast() -> Value {
    let output: Value = serde_json::from_str(PAUSABLE_OUTPUT).expect("fixture is JSON");
    output["sources"][PAUSABLE_PATH]["ast"].clone()
}

#[allow(dead_code)]
pub fn pausable_info() -> StaticInfo {
    StaticInfo::build(&pausable_ast()).expect("fixture indexes")
}

#[allow(dead_code)]
pub fn pausable_file() -> SolidityFile {
    SolidityFile::new(
        PathBuf::from(PAUSABLE_PATH),
        PAUSABLE_SOURCE.to_string(),
        SOLC_VERSION.to_string(),
        0,
        vec![Some(PathBuf::from(PAUSABLE_PATH))],
        1,
        pausable_info(),
    )
}

/// Editor position of byte `offset`, in the coordinates the query layer
/// expects with origin 1: 1-based lines, 1-based columns on the first line
/// and 0-based columns after it.
pub fn position_at(source: &str, offset: usize) -> LineColPosition {
    let before = &source[..offset];
    match before.rfind('\n') {
        None => LineColPosition::new(1, offset as u32 + 1),
        Some(newline) => LineColPosition::new(
            before.matches('\n').count() as u32 + 1,
            (offset - newline - 1) as u32,
        ),
    }
}

/// Selection covering the `nth` (0-based) occurrence of `needle`.
pub fn select(source: &str, needle: &str, nth: usize) -> LineColRange {
    let offset = source
        .match_indices(needle)
        .nth(nth)
        .map(|(offset, _)| offset)
        .unwrap_or_else(|| panic!("{needle:?} occurs fewer than {} times", nth + 1));
    LineColRange::new(
        position_at(source, offset),
        position_at(source, offset + needle.len()),
    )
}

/// Returns a canned compiler output and counts invocations.
#[allow(dead_code)]
pub struct FixtureCompiler {
    output: Value,
    imports: Vec<String>,
    pub calls: AtomicUsize,
}

#[allow(dead_code)]
impl FixtureCompiler {
    pub fn new(output: &str) -> Arc<Self> {
        Self::with_imports(output, &[])
    }

    /// Resolves each of `imports` before answering, as solc does.
    pub fn with_imports(output: &str, imports: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            output: serde_json::from_str(output).expect("fixture is JSON"),
            imports: imports.iter().map(|s| s.to_string()).collect(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Compiler for FixtureCompiler {
    fn version(&self) -> String {
        SOLC_VERSION.to_string()
    }

    fn compile(&self, input: &Value, imports: &dyn ImportResolver) -> Result<Value, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if input["sources"].as_object().is_none_or(|s| s.is_empty()) {
            return Err("no sources in standard input".into());
        }
        for import in &self.imports {
            imports.resolve(import)?;
        }
        Ok(self.output.clone())
    }
}

#[allow(dead_code)]
pub fn manager_with(compiler: Arc<dyn Compiler>) -> SolidityManager {
    SolidityManager::builder().with_compiler(compiler).build()
}

#[allow(dead_code)]
pub fn token_output() -> CompilerOutput {
    CompilerOutput::from_json(TOKEN_OUTPUT).expect("fixture parses")
}

#[allow(dead_code)]
pub fn path(p: &str) -> &Path {
    Path::new(p)
}
