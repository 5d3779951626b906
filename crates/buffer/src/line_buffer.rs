// Chunk: docs/chunks/cell_text_buffer - Line-based text storage for panel cells
//!
//! LineBuffer is the public API for cell text storage and editing.
//!
//! It stores content as a vector of lines (a panel cell is small and
//! line-oriented; the layout engine only ever asks for line counts and line
//! content, so a flat line vector beats a byte-oriented structure here) and
//! tracks the cursor as (line, column). Horizontal movement and backward
//! deletion operate on grapheme cluster boundaries so multi-scalar characters
//! behave as single units.

use unicode_segmentation::UnicodeSegmentation;

use crate::types::Position;

/// Returns the byte index of char column `col` in `s`, clamped to `s.len()`.
fn byte_index(s: &str, col: usize) -> usize {
    s.char_indices()
        .nth(col)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Returns the char-column of the grapheme boundary preceding `col`.
///
/// Returns 0 if `col` is at or before the first boundary.
fn prev_grapheme_col(s: &str, col: usize) -> usize {
    let mut prev = 0;
    let mut chars_seen = 0;
    for g in s.graphemes(true) {
        let next = chars_seen + g.chars().count();
        if next >= col {
            return prev;
        }
        prev = next;
        chars_seen = next;
    }
    prev
}

/// Returns the char-column of the grapheme boundary following `col`.
///
/// Returns the line's char count if `col` is at or past the last boundary.
fn next_grapheme_col(s: &str, col: usize) -> usize {
    let mut chars_seen = 0;
    for g in s.graphemes(true) {
        let next = chars_seen + g.chars().count();
        if chars_seen >= col {
            return next;
        }
        chars_seen = next;
    }
    chars_seen
}

/// A text buffer with cursor tracking and selection, stored line by line.
///
/// The buffer maintains:
/// - Content storage as an ordered vector of lines (never empty)
/// - Cursor position as (line, column) in char units
/// - Selection anchor for text selection (anchor-cursor model)
#[derive(Debug, Clone)]
pub struct LineBuffer {
    lines: Vec<String>,
    cursor: Position,
    /// Selection anchor position. When `Some`, the selection spans from anchor
    /// to cursor. The anchor may come before or after the cursor.
    selection_anchor: Option<Position>,
}

impl LineBuffer {
    /// Creates a new empty buffer (one empty line).
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: Position::default(),
            selection_anchor: None,
        }
    }

    /// Creates a buffer initialized with the given content.
    ///
    /// Note: We don't implement `FromStr` because it requires returning
    /// `Result`, but parsing a string into a LineBuffer cannot fail.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Self {
        let mut lines: Vec<String> = content.split('\n').map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            cursor: Position::default(),
            selection_anchor: None,
        }
    }

    // ==================== Accessors ====================

    /// Returns the current cursor position.
    pub fn cursor_position(&self) -> Position {
        self.cursor
    }

    /// Returns the number of lines in the buffer.
    ///
    /// Always at least 1 (even for an empty buffer).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the content of the specified line.
    ///
    /// Returns an empty string if the line index is out of bounds.
    pub fn line_content(&self, line: usize) -> &str {
        self.lines.get(line).map(String::as_str).unwrap_or("")
    }

    /// Returns the length of the specified line in chars.
    pub fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map(|l| l.chars().count()).unwrap_or(0)
    }

    /// Returns the full buffer content with `\n` line separators.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }

    /// Returns the lines of the buffer, in order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns true if the buffer holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    // ==================== Selection ====================

    /// Places the selection anchor at the current cursor position.
    pub fn set_selection_anchor_at_cursor(&mut self) {
        self.selection_anchor = Some(self.cursor);
    }

    /// Clears the selection anchor.
    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    /// Returns the selection anchor position, if one is set.
    pub fn selection_anchor(&self) -> Option<Position> {
        self.selection_anchor
    }

    /// Returns true if a non-empty selection exists.
    pub fn has_selection(&self) -> bool {
        self.selection_anchor
            .map(|anchor| anchor != self.cursor)
            .unwrap_or(false)
    }

    /// Returns the selection as an ordered (start, end) pair.
    ///
    /// Returns `None` when there is no selection or the selection is empty.
    pub fn selection_range(&self) -> Option<(Position, Position)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        if anchor < self.cursor {
            Some((anchor, self.cursor))
        } else {
            Some((self.cursor, anchor))
        }
    }

    /// Returns the selected text, if any.
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        if start.line == end.line {
            let line = &self.lines[start.line];
            let a = byte_index(line, start.col);
            let b = byte_index(line, end.col);
            return Some(line[a..b].to_string());
        }

        let mut out = String::new();
        let first = &self.lines[start.line];
        out.push_str(&first[byte_index(first, start.col)..]);
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line);
        }
        let last = &self.lines[end.line];
        out.push('\n');
        out.push_str(&last[..byte_index(last, end.col)]);
        Some(out)
    }

    /// Selects the entire buffer content.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(Position::new(0, 0));
        self.cursor = Position::new(
            self.lines.len() - 1,
            self.line_len(self.lines.len() - 1),
        );
    }

    /// Deletes the selected text, collapsing the cursor to the selection start.
    ///
    /// No-op when there is no selection.
    pub fn delete_selection(&mut self) {
        let Some((start, end)) = self.selection_range() else {
            return;
        };

        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let a = byte_index(line, start.col);
            let b = byte_index(line, end.col);
            line.replace_range(a..b, "");
        } else {
            let tail = {
                let last = &self.lines[end.line];
                last[byte_index(last, end.col)..].to_string()
            };
            let first = &mut self.lines[start.line];
            first.truncate(byte_index(first, start.col));
            first.push_str(&tail);
            self.lines.drain(start.line + 1..=end.line);
        }

        self.cursor = start;
        self.selection_anchor = None;
    }

    // ==================== Cursor movement ====================

    /// Moves the cursor left by one grapheme cluster, wrapping to the end of
    /// the previous line at column 0.
    pub fn move_left(&mut self) {
        if self.cursor.col > 0 {
            let line = &self.lines[self.cursor.line];
            self.cursor.col = prev_grapheme_col(line, self.cursor.col);
        } else if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.line_len(self.cursor.line);
        }
    }

    /// Moves the cursor right by one grapheme cluster, wrapping to the start
    /// of the next line at end of line.
    pub fn move_right(&mut self) {
        if self.cursor.col < self.line_len(self.cursor.line) {
            let line = &self.lines[self.cursor.line];
            self.cursor.col = next_grapheme_col(line, self.cursor.col);
        } else if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.col = 0;
        }
    }

    /// Moves the cursor up one line, clamping the column to the line length.
    pub fn move_up(&mut self) {
        if self.cursor.line > 0 {
            self.cursor.line -= 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.line));
        }
    }

    /// Moves the cursor down one line, clamping the column to the line length.
    pub fn move_down(&mut self) {
        if self.cursor.line + 1 < self.lines.len() {
            self.cursor.line += 1;
            self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.line));
        }
    }

    /// Moves the cursor to the start of the current line.
    pub fn move_to_line_start(&mut self) {
        self.cursor.col = 0;
    }

    /// Moves the cursor to the end of the current line.
    pub fn move_to_line_end(&mut self) {
        self.cursor.col = self.line_len(self.cursor.line);
    }

    /// Moves the cursor to the start of the buffer.
    pub fn move_to_buffer_start(&mut self) {
        self.cursor = Position::new(0, 0);
    }

    /// Moves the cursor to the end of the buffer.
    pub fn move_to_buffer_end(&mut self) {
        self.cursor = Position::new(
            self.lines.len() - 1,
            self.line_len(self.lines.len() - 1),
        );
    }

    /// Sets the cursor position, clamping to valid bounds.
    pub fn set_cursor(&mut self, pos: Position) {
        let line = pos.line.min(self.lines.len() - 1);
        let col = pos.col.min(self.line_len(line));
        self.cursor = Position::new(line, col);
    }

    // ==================== Mutations ====================

    /// Inserts a character at the cursor, replacing any selection.
    pub fn insert_char(&mut self, ch: char) {
        if ch == '\n' {
            self.insert_newline();
            return;
        }
        self.delete_selection();
        let col = self.cursor.col;
        let line = &mut self.lines[self.cursor.line];
        let idx = byte_index(line, col);
        line.insert(idx, ch);
        self.cursor.col += 1;
    }

    /// Splits the current line at the cursor, replacing any selection.
    pub fn insert_newline(&mut self) {
        self.delete_selection();
        let col = self.cursor.col;
        let line = &mut self.lines[self.cursor.line];
        let idx = byte_index(line, col);
        let tail = line.split_off(idx);
        self.lines.insert(self.cursor.line + 1, tail);
        self.cursor.line += 1;
        self.cursor.col = 0;
    }

    /// Inserts a string at the cursor, replacing any selection.
    ///
    /// Embedded `\n` characters split lines exactly as `insert_newline` would.
    pub fn insert_str(&mut self, s: &str) {
        self.delete_selection();
        let mut fragments = s.split('\n');

        // First fragment goes into the current line at the cursor.
        let first = fragments.next().unwrap_or("");
        let col = self.cursor.col;
        let line = &mut self.lines[self.cursor.line];
        let idx = byte_index(line, col);
        let tail = line.split_off(idx);
        line.push_str(first);
        self.cursor.col += first.chars().count();

        // Remaining fragments each start a new line; the original tail is
        // re-attached after the last one.
        let mut last_line = self.cursor.line;
        for fragment in fragments {
            last_line += 1;
            self.lines.insert(last_line, fragment.to_string());
            self.cursor = Position::new(last_line, fragment.chars().count());
        }
        self.lines[self.cursor.line].push_str(&tail);
    }

    /// Appends text at the end of the buffer, moving the cursor there.
    ///
    /// This is the output-cell path: stream chunks are committed by appending,
    /// never by editing in place.
    pub fn append_str(&mut self, s: &str) {
        self.clear_selection();
        self.move_to_buffer_end();
        self.insert_str(s);
    }

    /// Deletes one grapheme cluster before the cursor, or joins with the
    /// previous line at column 0. Deletes the selection instead when one exists.
    pub fn delete_backward(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        self.clear_selection();
        if self.cursor.col > 0 {
            let line = &mut self.lines[self.cursor.line];
            let from_col = prev_grapheme_col(line, self.cursor.col);
            let a = byte_index(line, from_col);
            let b = byte_index(line, self.cursor.col);
            line.replace_range(a..b, "");
            self.cursor.col = from_col;
        } else if self.cursor.line > 0 {
            let current = self.lines.remove(self.cursor.line);
            self.cursor.line -= 1;
            self.cursor.col = self.line_len(self.cursor.line);
            self.lines[self.cursor.line].push_str(&current);
        }
    }

    /// Deletes one grapheme cluster after the cursor, or joins with the next
    /// line at end of line. Deletes the selection instead when one exists.
    pub fn delete_forward(&mut self) {
        if self.has_selection() {
            self.delete_selection();
            return;
        }
        self.clear_selection();
        if self.cursor.col < self.line_len(self.cursor.line) {
            let line = &mut self.lines[self.cursor.line];
            let to_col = next_grapheme_col(line, self.cursor.col);
            let a = byte_index(line, self.cursor.col);
            let b = byte_index(line, to_col);
            line.replace_range(a..b, "");
        } else if self.cursor.line + 1 < self.lines.len() {
            let next = self.lines.remove(self.cursor.line + 1);
            self.lines[self.cursor.line].push_str(&next);
        }
    }

    /// Drops whole lines from the front until at most `max_lines` remain.
    ///
    /// Used to cap output-cell scrollback. Cursor and anchor are shifted up
    /// with the content (clamped at line 0).
    pub fn truncate_front(&mut self, max_lines: usize) {
        let max_lines = max_lines.max(1);
        if self.lines.len() <= max_lines {
            return;
        }
        let excess = self.lines.len() - max_lines;
        self.lines.drain(..excess);
        self.cursor.line = self.cursor.line.saturating_sub(excess);
        self.cursor.col = self.cursor.col.min(self.line_len(self.cursor.line));
        if let Some(anchor) = self.selection_anchor.as_mut() {
            anchor.line = anchor.line.saturating_sub(excess);
        }
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
