//! Seams to the external Solidity compiler and its import callback.

use crate::error::Result;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::path::{Path, PathBuf};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Supplies the text of files a compilation imports.
pub trait ImportResolver: Send + Sync {
    fn resolve(&self, path: &str) -> std::result::Result<String, BoxError>;
}

/// Reads imports straight from disk, relative paths against `base`.
#[derive(Debug, Clone, Default)]
pub struct FsImportResolver {
    base: Option<PathBuf>,
}

impl FsImportResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }
}

impl ImportResolver for FsImportResolver {
    fn resolve(&self, path: &str) -> std::result::Result<String, BoxError> {
        let full = match &self.base {
            Some(base) if Path::new(path).is_relative() => base.join(path),
            _ => PathBuf::from(path),
        };
        if !full.is_file() {
            return Err(format!("File {:?} not found", full.display().to_string()).into());
        }
        Ok(std::fs::read_to_string(&full)?)
    }
}

/// A Solidity compiler speaking the standard-JSON interface.
pub trait Compiler: Send + Sync {
    /// Version string as reported by solc, e.g. `0.8.19+commit.7dd6d404`.
    fn version(&self) -> String;

    fn compile(
        &self,
        input: &Value,
        imports: &dyn ImportResolver,
    ) -> std::result::Result<Value, BoxError>;
}

/// Standard-JSON input asking for the AST of `content` only.
///
/// Top-level keys of `overrides` replace the generated ones. Error recovery
/// is switched on for compilers that support it.
pub fn standard_input(path: &str, content: &str, compiler_version: &str, overrides: &Value) -> Value {
    let mut sources = Map::new();
    sources.insert(path.to_string(), json!({ "content": content }));
    let mut input = json!({
        "language": "Solidity",
        "sources": sources,
        "settings": {
            "outputSelection": { "*": { "": ["ast"] } },
            "optimizer": { "enabled": false }
        }
    });

    if let (Some(target), Some(extra)) = (input.as_object_mut(), overrides.as_object()) {
        for (key, value) in extra {
            target.insert(key.clone(), value.clone());
        }
    }

    if version_at_least(compiler_version, (0, 5, 10)) {
        if let Some(settings) = input.get_mut("settings").and_then(Value::as_object_mut) {
            settings.insert("parserErrorRecovery".to_string(), Value::Bool(true));
        }
    }
    input
}

/// `major.minor.patch` of a solc version string; build metadata is ignored.
pub fn parse_version(version: &str) -> Option<(u64, u64, u64)> {
    let core = version
        .trim()
        .trim_start_matches('v')
        .split(['+', '-'])
        .next()?;
    let mut parts = core.split('.').map(|p| p.parse::<u64>().ok());
    Some((parts.next()??, parts.next()??, parts.next()??))
}

pub fn version_at_least(version: &str, minimum: (u64, u64, u64)) -> bool {
    parse_version(version).is_some_and(|v| v >= minimum)
}

/// The parts of solc's standard-JSON output the index consumes.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct CompilerOutput {
    #[serde(default)]
    pub sources: IndexMap<String, CompiledSource>,
    #[serde(default)]
    pub errors: Vec<CompilerDiagnostic>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CompiledSource {
    /// Index of this file in the compilation, the `fileIndex` of its ranges.
    pub id: i64,
    #[serde(default)]
    pub ast: Option<Value>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct CompilerDiagnostic {
    pub severity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub formatted_message: Option<String>,
}

impl CompilerDiagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

impl CompilerOutput {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `fileIndex -> path` over the sources that produced an AST.
    pub fn source_list(&self) -> Vec<Option<PathBuf>> {
        let mut list: Vec<Option<PathBuf>> = Vec::new();
        for (path, source) in &self.sources {
            let Ok(index) = usize::try_from(source.id) else {
                continue;
            };
            if source.ast.is_none() {
                continue;
            }
            if list.len() <= index {
                list.resize(index + 1, None);
            }
            list[index] = Some(PathBuf::from(path));
        }
        list
    }

    pub fn source(&self, path: &Path) -> Option<&CompiledSource> {
        self.sources.get(path.to_string_lossy().as_ref())
    }

    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(CompilerDiagnostic::is_error)
    }
}
