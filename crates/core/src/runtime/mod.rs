//! Compiles Solidity files and keeps one index per file.

pub mod compiler;
pub mod config;

pub use compiler::{
    BoxError, CompiledSource, Compiler, CompilerDiagnostic, CompilerOutput, FsImportResolver,
    ImportResolver, standard_input,
};
pub use config::ManagerConfig;

use crate::ast::AstNode;
use crate::error::{Result, SolscopeError};
use crate::features;
use crate::index::StaticInfo;
use crate::model::SolidityFile;
use dashmap::DashMap;
use solscope_api::{
    ApiError, ApiResult, LineColPosition, LineColRange, NavigationService, NodeLocation,
    SourceRange,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Outcome of a compile request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileStatus {
    /// The existing index was kept; content and compiler are unchanged.
    Cached,
    /// A fresh index was built and published.
    Indexed,
    /// The compiler produced no AST for the file; any previous index stays.
    NoAst,
}

/// Owns the indexed files of a workspace.
///
/// Indexes are built completely, cross-file merge included, before they are
/// published, so readers always see a finished [`SolidityFile`].
pub struct SolidityManager {
    config: ManagerConfig,
    compiler: Option<Arc<dyn Compiler>>,
    imports: Arc<dyn ImportResolver>,
    files: DashMap<PathBuf, Arc<SolidityFile>>,
}

pub struct SolidityManagerBuilder {
    config: ManagerConfig,
    compiler: Option<Arc<dyn Compiler>>,
    imports: Arc<dyn ImportResolver>,
}

impl SolidityManagerBuilder {
    pub fn new() -> Self {
        Self {
            config: ManagerConfig::default(),
            compiler: None,
            imports: Arc::new(FsImportResolver::new()),
        }
    }

    pub fn with_config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_compiler(mut self, compiler: Arc<dyn Compiler>) -> Self {
        self.compiler = Some(compiler);
        self
    }

    pub fn with_import_resolver(mut self, imports: Arc<dyn ImportResolver>) -> Self {
        self.imports = imports;
        self
    }

    pub fn build(self) -> SolidityManager {
        SolidityManager {
            config: self.config,
            compiler: self.compiler,
            imports: self.imports,
            files: DashMap::new(),
        }
    }
}

impl Default for SolidityManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolidityManager {
    pub fn builder() -> SolidityManagerBuilder {
        SolidityManagerBuilder::new()
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Compile `content` as the file at `path` and index the result.
    ///
    /// `content` need not exist on disk yet. With caching enabled, an index
    /// built from identical content by the same compiler is kept.
    pub fn compile(&self, content: &str, path: &Path) -> Result<CompileStatus> {
        let compiler = self
            .compiler
            .as_ref()
            .ok_or_else(|| SolscopeError::Compiler("no compiler configured".to_string()))?;
        let version = compiler.version();

        if self.config.use_cache
            && self
                .file(path)
                .is_some_and(|file| file.is_same_content(content, &version))
        {
            tracing::debug!(path = %path.display(), "Content unchanged, reusing index");
            return Ok(CompileStatus::Cached);
        }

        let input = standard_input(
            &path.to_string_lossy(),
            content,
            &version,
            &self.config.standard_input,
        );
        let raw = compiler.compile(&input, self.imports.as_ref())?;
        let output = CompilerOutput::from_value(raw)?;
        self.ingest(path, content, &version, &output)
    }

    pub fn compile_if_not_compiled(&self, content: &str, path: &Path) -> Result<CompileStatus> {
        if self.is_compiled(path) {
            return Ok(CompileStatus::Cached);
        }
        self.compile(content, path)
    }

    /// Index `path` from a compiler output obtained elsewhere.
    ///
    /// Nodes of every other source in `output` are merged into the file's
    /// index so declarations in imported files resolve.
    pub fn ingest(
        &self,
        path: &Path,
        content: &str,
        compiler_version: &str,
        output: &CompilerOutput,
    ) -> Result<CompileStatus> {
        for diagnostic in &output.errors {
            let message = diagnostic
                .formatted_message
                .as_deref()
                .unwrap_or(&diagnostic.message)
                .trim_end();
            if diagnostic.is_error() {
                tracing::warn!(path = %path.display(), kind = %diagnostic.kind, "{}", message);
            } else {
                tracing::debug!(path = %path.display(), severity = %diagnostic.severity, "{}", message);
            }
        }
        if output.has_errors() {
            tracing::info!(
                path = %path.display(),
                "Compiler reported errors; indexing whatever AST was recovered"
            );
        }

        let Some((source, ast)) = output
            .source(path)
            .and_then(|source| source.ast.as_ref().map(|ast| (source, ast)))
        else {
            tracing::info!(path = %path.display(), "Compiler produced no AST");
            return Ok(CompileStatus::NoAst);
        };

        let mut static_info = StaticInfo::build(ast)?;
        let own_key = path.to_string_lossy();
        for (other_path, other) in &output.sources {
            if *other_path == own_key {
                continue;
            }
            if let Some(other_ast) = &other.ast {
                static_info.merge_ids(&StaticInfo::build(other_ast)?);
            }
        }

        let file = SolidityFile::new(
            path.to_path_buf(),
            content.to_string(),
            compiler_version.to_string(),
            source.id,
            output.source_list(),
            self.config.line_origin,
            static_info,
        );
        tracing::info!(
            path = %path.display(),
            nodes = file.static_info().len(),
            sources = output.sources.len(),
            "Indexed file"
        );
        self.files.insert(path.to_path_buf(), Arc::new(file));
        Ok(CompileStatus::Indexed)
    }

    pub fn is_compiled(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn file(&self, path: &Path) -> Option<Arc<SolidityFile>> {
        self.files.get(path).map(|entry| Arc::clone(entry.value()))
    }

    pub fn files(&self) -> Vec<PathBuf> {
        self.files.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn evict(&self, path: &Path) -> Option<Arc<SolidityFile>> {
        self.files.remove(path).map(|(_, file)| file)
    }

    fn indexed_file(&self, path: &Path) -> ApiResult<Arc<SolidityFile>> {
        self.file(path).ok_or_else(|| {
            tracing::warn!(path = %path.display(), "Query against a file that is not indexed");
            ApiError::UnknownFile(path.to_path_buf())
        })
    }

    /// Tightest node containing `position`.
    pub fn ast_node_at_position(
        &self,
        path: &Path,
        position: &LineColPosition,
    ) -> ApiResult<Option<AstNode>> {
        let file = self.indexed_file(path)?;
        Ok(file
            .offset(position)
            .and_then(|offset| file.static_info().offset_to_ast_node(offset))
            .cloned())
    }

    /// Text of `range`, whose file index is resolved through the compilation
    /// of `path`. `None` if the file holding the range is not indexed.
    pub fn text_from_source_range(
        &self,
        path: &Path,
        range: &SourceRange,
    ) -> ApiResult<Option<String>> {
        let origin = self.indexed_file(path)?;
        let Some(target) = origin.source_path(range.file_index) else {
            return Ok(None);
        };
        let text = if target == origin.path() {
            origin.text(range).map(str::to_string)
        } else {
            self.file(target)
                .and_then(|file| file.text(range).map(str::to_string))
        };
        Ok(text)
    }

    pub fn text_from_src(&self, path: &Path, src: &str) -> ApiResult<Option<String>> {
        let range = SourceRange::parse(src).map_err(SolscopeError::from)?;
        self.text_from_source_range(path, &range)
    }

    fn location(&self, origin: &SolidityFile, node: &AstNode) -> NodeLocation {
        let path = origin.source_path(node.src.file_index).map(Path::to_path_buf);
        let range = match &path {
            Some(p) if p == origin.path() => origin.line_col_range(&node.src),
            Some(p) => self.file(p).and_then(|file| file.line_col_range(&node.src)),
            None => None,
        };
        NodeLocation {
            id: node.id,
            node_type: node.node_type.clone(),
            name: node.name().map(str::to_string),
            src: node.src,
            path,
            range,
        }
    }
}

impl NavigationService for SolidityManager {
    fn goto_definition(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Option<NodeLocation>> {
        let file = self.indexed_file(path)?;
        Ok(features::get_definition(&file, selection).map(|node| self.location(&file, node)))
    }

    fn goto_type_definition(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Option<NodeLocation>> {
        let file = self.indexed_file(path)?;
        Ok(features::get_type_definition(&file, selection)
            .map(|node| self.location(&file, node)))
    }

    fn find_references(
        &self,
        path: &Path,
        selection: &LineColRange,
    ) -> ApiResult<Vec<NodeLocation>> {
        let file = self.indexed_file(path)?;
        Ok(features::get_references(&file, selection)
            .unwrap_or_default()
            .into_iter()
            .map(|node| self.location(&file, node))
            .collect())
    }
}
