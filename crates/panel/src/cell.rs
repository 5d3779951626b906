// Chunk: docs/chunks/cell_panel - Cell model, layout engine, and panel controller
//!
//! A single cell: one block in the vertically stacked panel.
//!
//! Cells come in two roles. Output cells are append-only - stream text and
//! panel notices land at the end, and the user can never edit them. Input
//! cells are editable until the moment of submission, after which they are
//! frozen history and never reused. The editable surface is a composed
//! [`LineBuffer`], not a specialized subclass of anything.

use replpad_buffer::LineBuffer;

/// The role of a cell in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRole {
    /// Process output, append-only.
    Output,
    /// User input, editable until frozen.
    Input,
}

/// One output or input block.
#[derive(Debug)]
pub struct Cell {
    role: CellRole,
    buffer: LineBuffer,
    /// Set when an input cell is submitted; a frozen cell accepts no edits.
    frozen: bool,
}

impl Cell {
    /// Creates an output cell seeded with `text` (may be empty).
    pub fn output(text: &str) -> Self {
        Self {
            role: CellRole::Output,
            buffer: LineBuffer::from_str(text),
            frozen: false,
        }
    }

    /// Creates an empty, editable input cell.
    pub fn input() -> Self {
        Self {
            role: CellRole::Input,
            buffer: LineBuffer::new(),
            frozen: false,
        }
    }

    pub fn role(&self) -> CellRole {
        self.role
    }

    /// Number of lines this cell occupies, for layout.
    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    /// Read access to the cell's text.
    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    /// The cell's full text content.
    pub fn content(&self) -> String {
        self.buffer.content()
    }

    /// Returns true if this cell currently accepts user edits.
    pub fn is_editable(&self) -> bool {
        self.role == CellRole::Input && !self.frozen
    }

    /// Edit access, only while the cell accepts user edits.
    pub fn buffer_mut(&mut self) -> Option<&mut LineBuffer> {
        if self.is_editable() {
            Some(&mut self.buffer)
        } else {
            None
        }
    }

    /// Freezes an input cell into history. Idempotent.
    pub fn freeze(&mut self) {
        if self.role == CellRole::Input {
            self.frozen = true;
        }
    }

    /// Appends stream text to an output cell.
    ///
    /// The append path bypasses the editability check: output cells are
    /// never user-editable, but the stream readers always may append.
    pub fn append_output(&mut self, text: &str) {
        debug_assert_eq!(self.role, CellRole::Output);
        self.buffer.append_str(text);
    }

    /// Appends a panel notice (exit status, errors) on its own line.
    pub fn append_notice(&mut self, notice: &str) {
        debug_assert_eq!(self.role, CellRole::Output);
        if self.buffer.is_empty() {
            self.buffer.append_str(notice);
        } else {
            self.buffer.append_str("\n");
            self.buffer.append_str(notice);
        }
    }

    /// Caps an output cell's scrollback to `max_lines`.
    pub fn cap_scrollback(&mut self, max_lines: usize) {
        debug_assert_eq!(self.role, CellRole::Output);
        self.buffer.truncate_front(max_lines);
    }
}
