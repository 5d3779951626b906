// Chunk: docs/chunks/cell_text_buffer - Line-based text storage for panel cells

/// Position in the buffer as (line, column) where both are 0-indexed.
///
/// Columns count chars, not bytes. Grapheme-aware movement is layered on top
/// by [`LineBuffer`](crate::LineBuffer); a `Position` itself is just an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Compare by line first, then by column
        match self.line.cmp(&other.line) {
            std::cmp::Ordering::Equal => self.col.cmp(&other.col),
            ord => ord,
        }
    }
}
