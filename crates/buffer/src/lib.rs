// Chunk: docs/chunks/cell_text_buffer - Line-based text storage for panel cells

//! replpad-buffer: line-based text storage for replpad cells.
//!
//! This crate provides [`LineBuffer`], the text storage used by both output
//! and input cells in the panel. It is designed around the narrow contract
//! the panel core actually needs:
//! - Ordered line storage with per-line access (the layout engine works in
//!   line counts)
//! - Insertion at the cursor and appending at the end (the output path)
//! - Cursor movement and selection queries (the input path)
//!
//! # Example
//!
//! ```
//! use replpad_buffer::{LineBuffer, Position};
//!
//! let mut buffer = LineBuffer::new();
//!
//! // Insert some text
//! buffer.insert_str("Hello, world!");
//! assert_eq!(buffer.line_count(), 1);
//! assert_eq!(buffer.line_content(0), "Hello, world!");
//!
//! // Stream output appends at the end, regardless of the cursor
//! buffer.set_cursor(Position::new(0, 0));
//! buffer.append_str("\nmore");
//! assert_eq!(buffer.line_count(), 2);
//! assert_eq!(buffer.line_content(1), "more");
//! ```
//!
//! Horizontal movement and backward deletion are grapheme-cluster aware, so
//! emoji and combining sequences behave as single units under editing.

mod line_buffer;
mod types;

pub use line_buffer::LineBuffer;
pub use types::Position;
