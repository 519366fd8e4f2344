use serde::{Deserialize, Serialize};

/// Origin used for editor coordinates unless configured otherwise.
pub const DEFAULT_ORIGIN: u32 = 1;

/// Editor-facing line/column coordinate. The origin of both fields is a
/// convention of the caller (1 by default).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineColPosition {
    pub line: u32,
    pub character: u32,
}

impl LineColPosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }

    /// Convert a zero-origin LSP position into a query position for `origin`.
    ///
    /// Query positions carry origin-based columns on the first line only;
    /// columns on every later line are 0-based. Positions rendered from byte
    /// offsets are origin-based throughout, so this is not the inverse of
    /// [`LineColPosition::to_lsp`].
    pub fn from_lsp(position: lsp_types::Position, origin: u32) -> Self {
        let character = if position.line == 0 {
            position.character + origin
        } else {
            position.character
        };
        Self {
            line: position.line + origin,
            character,
        }
    }

    /// Convert a rendered position into a zero-origin LSP position.
    /// Coordinates below `origin` saturate at zero.
    pub fn to_lsp(&self, origin: u32) -> lsp_types::Position {
        lsp_types::Position::new(
            self.line.saturating_sub(origin),
            self.character.saturating_sub(origin),
        )
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineColRange {
    pub start: LineColPosition,
    pub end: LineColPosition,
}

impl LineColRange {
    pub fn new(start: LineColPosition, end: LineColPosition) -> Self {
        Self { start, end }
    }

    pub fn from_lsp(range: lsp_types::Range, origin: u32) -> Self {
        Self {
            start: LineColPosition::from_lsp(range.start, origin),
            end: LineColPosition::from_lsp(range.end, origin),
        }
    }

    pub fn to_lsp(&self, origin: u32) -> lsp_types::Range {
        lsp_types::Range::new(self.start.to_lsp(origin), self.end.to_lsp(origin))
    }
}
