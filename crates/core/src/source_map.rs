//! Conversions between solc byte ranges and editor line/column coordinates.
//!
//! Line/column conversions work off the ascending byte offsets of the `\n`
//! characters of a file (its "line breaks").

use solscope_api::{LineColPosition, LineColRange, SourceRange, SrcParseError};

/// Largest index `i` with `array[i] <= target`, or `None` when every element
/// is greater (or `array` is empty). `array` must be sorted ascending.
pub fn find_lower_bound<T: Ord>(target: &T, array: &[T]) -> Option<usize> {
    array.partition_point(|x| x <= target).checked_sub(1)
}

/// Byte offsets of every `\n` in `source`.
pub fn line_breaks_from_source(source: &str) -> Vec<usize> {
    source
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'\n')
        .map(|(i, _)| i)
        .collect()
}

/// Decode a `start:length:fileIndex` attribute.
pub fn source_range_from_src(src: &str) -> Result<SourceRange, SrcParseError> {
    src.parse()
}

pub fn src_from_source_range(range: &SourceRange) -> String {
    range.to_string()
}

/// Line/column of a byte offset. A `\n` belongs to the line it terminates.
pub fn position_from_offset(
    offset: usize,
    line_breaks: &[usize],
    line_origin: u32,
    col_origin: u32,
) -> LineColPosition {
    let line = match find_lower_bound(&offset, line_breaks) {
        Some(i) if line_breaks[i] == offset => i,
        Some(i) => i + 1,
        None => 0,
    };
    let line_start = if line == 0 {
        0
    } else {
        line_breaks[line - 1] + 1
    };
    LineColPosition {
        line: line as u32 + line_origin,
        character: (offset - line_start) as u32 + col_origin,
    }
}

/// Byte offset of an editor position.
///
/// On the first line both coordinates count from `origin`. On later lines
/// only the line does; the column is added to the start of the line as is,
/// so `(9, 8)` with origin 1 is byte 8 of the ninth line.
///
/// Returns `None` when the position lies outside the file: a line below
/// `origin`, a first-line column below `origin`, or a line past the last
/// known line break.
pub fn offset_from_position(
    position: &LineColPosition,
    line_breaks: &[usize],
    origin: u32,
) -> Option<usize> {
    if position.line < origin {
        return None;
    }
    if position.line == origin {
        return position
            .character
            .checked_sub(origin)
            .map(|character| character as usize);
    }
    let break_index = (position.line - origin - 1) as usize;
    let line_break = *line_breaks.get(break_index)?;
    Some(line_break + 1 + position.character as usize)
}

/// Byte range covered by an editor selection.
pub fn source_range_from_line_col_range(
    range: &LineColRange,
    line_breaks: &[usize],
    origin: u32,
    file_index: i64,
) -> Option<SourceRange> {
    let start = offset_from_position(&range.start, line_breaks, origin)? as i64;
    let end = offset_from_position(&range.end, line_breaks, origin)? as i64;
    Some(SourceRange::new(start, end - start, file_index))
}

/// Editor range of a byte range; `None` for generated (negative) ranges.
pub fn line_col_range_from_source_range(
    range: &SourceRange,
    line_breaks: &[usize],
    line_origin: u32,
    col_origin: u32,
) -> Option<LineColRange> {
    if !range.is_valid() {
        return None;
    }
    let start = range.start as usize;
    let end = range.end()? as usize;
    Some(LineColRange {
        start: position_from_offset(start, line_breaks, line_origin, col_origin),
        end: position_from_offset(end, line_breaks, line_origin, col_origin),
    })
}

/// Line breaks of one file, computed once from its text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_breaks: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        Self {
            line_breaks: line_breaks_from_source(source),
        }
    }

    pub fn line_breaks(&self) -> &[usize] {
        &self.line_breaks
    }

    pub fn offset(&self, position: &LineColPosition, origin: u32) -> Option<usize> {
        offset_from_position(position, &self.line_breaks, origin)
    }

    pub fn position(&self, offset: usize, origin: u32) -> LineColPosition {
        position_from_offset(offset, &self.line_breaks, origin, origin)
    }

    pub fn source_range(
        &self,
        range: &LineColRange,
        origin: u32,
        file_index: i64,
    ) -> Option<SourceRange> {
        source_range_from_line_col_range(range, &self.line_breaks, origin, file_index)
    }

    pub fn line_col_range(&self, range: &SourceRange, origin: u32) -> Option<LineColRange> {
        line_col_range_from_source_range(range, &self.line_breaks, origin, origin)
    }
}
