use crate::index::StaticInfo;
use crate::source_map::LineIndex;
use solscope_api::{LineColPosition, LineColRange, SourceRange};
use std::path::{Path, PathBuf};
use xxhash_rust::xxh3::xxh3_64;

pub fn hash_content(content: &str) -> u64 {
    xxh3_64(content.as_bytes())
}

/// One compiled source file with its index.
///
/// Published behind an `Arc` once built and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SolidityFile {
    path: PathBuf,
    content: String,
    content_hash: u64,
    compiler_version: String,
    file_index: i64,
    /// `fileIndex -> path` for the compilation that produced this file.
    source_list: Vec<Option<PathBuf>>,
    line_index: LineIndex,
    line_origin: u32,
    static_info: StaticInfo,
}

impl SolidityFile {
    pub fn new(
        path: PathBuf,
        content: String,
        compiler_version: String,
        file_index: i64,
        source_list: Vec<Option<PathBuf>>,
        line_origin: u32,
        static_info: StaticInfo,
    ) -> Self {
        Self {
            path,
            content_hash: hash_content(&content),
            line_index: LineIndex::new(&content),
            content,
            compiler_version,
            file_index,
            source_list,
            line_origin,
            static_info,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    pub fn compiler_version(&self) -> &str {
        &self.compiler_version
    }

    pub fn file_index(&self) -> i64 {
        self.file_index
    }

    pub fn source_list(&self) -> &[Option<PathBuf>] {
        &self.source_list
    }

    /// Path of the source unit numbered `file_index` in this compilation.
    pub fn source_path(&self, file_index: i64) -> Option<&Path> {
        usize::try_from(file_index)
            .ok()
            .and_then(|i| self.source_list.get(i))
            .and_then(|p| p.as_deref())
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn line_origin(&self) -> u32 {
        self.line_origin
    }

    pub fn static_info(&self) -> &StaticInfo {
        &self.static_info
    }

    /// Whether this index can be reused for `content` compiled by `compiler_version`.
    pub fn is_same_content(&self, content: &str, compiler_version: &str) -> bool {
        self.content_hash == hash_content(content)
            && self.content == content
            && self.compiler_version == compiler_version
    }

    /// Text covered by `range` in this file. `None` if the range is negative,
    /// out of bounds, or splits a UTF-8 character.
    pub fn text(&self, range: &SourceRange) -> Option<&str> {
        if !range.is_valid() {
            return None;
        }
        let end = usize::try_from(range.end()?).ok()?;
        self.content.get(range.start as usize..end)
    }

    /// Byte range of an editor selection in this file.
    pub fn source_range(&self, selection: &LineColRange) -> Option<SourceRange> {
        self.line_index
            .source_range(selection, self.line_origin, self.file_index)
    }

    pub fn offset(&self, position: &LineColPosition) -> Option<usize> {
        self.line_index.offset(position, self.line_origin)
    }

    pub fn line_col_range(&self, range: &SourceRange) -> Option<LineColRange> {
        self.line_index.line_col_range(range, self.line_origin)
    }
}
