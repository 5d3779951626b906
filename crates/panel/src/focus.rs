// Chunk: docs/chunks/cell_input_routing - Key resolution for the editable input cell
//!
//! Key event routing for the editable input cell.
//!
//! Chord resolution is a stateless pure function: (modifiers, key) →
//! `Option<EditCommand>`. All chords are single-step modifier+key
//! combinations, so no state machine is needed. The panel controller owns
//! the Return key (submit vs. newline is a panel decision, not an editing
//! one) and viewport keys (PageUp/PageDown); everything here is plain text
//! editing applied to a [`LineBuffer`].

use replpad_buffer::LineBuffer;
use replpad_input::{Key, KeyEvent};

/// Result of offering an input event to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event was consumed
    Yes,
    /// The event was not handled (should propagate or be ignored)
    No,
}

/// A cursor motion within the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    LineStart,
    LineEnd,
    BufferStart,
    BufferEnd,
}

/// Commands that can be executed on the input cell's buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Insert a character at the cursor
    InsertChar(char),
    /// Delete the grapheme before the cursor (Backspace)
    DeleteBackward,
    /// Delete the grapheme after the cursor (Delete key)
    DeleteForward,
    /// Move the cursor; `select` extends the selection instead of clearing it
    Move { motion: Motion, select: bool },
    /// Select the whole buffer
    SelectAll,
}

/// Resolves a key event to an editing command.
///
/// Returns `None` for events this module doesn't own: Return (panel
/// decision), PageUp/PageDown (viewport), and anything bound elsewhere.
pub fn resolve_command(event: &KeyEvent) -> Option<EditCommand> {
    let mods = &event.modifiers;
    let select = mods.shift;

    let movement = |motion| Some(EditCommand::Move { motion, select });

    match &event.key {
        // Printable characters (no Command/Control modifier)
        Key::Char(ch) if !mods.command && !mods.control => Some(EditCommand::InsertChar(*ch)),

        // Tab inserts a literal tab
        Key::Tab if !mods.command && !mods.control => Some(EditCommand::InsertChar('\t')),

        Key::Backspace => Some(EditCommand::DeleteBackward),
        Key::Delete => Some(EditCommand::DeleteForward),

        // Cmd+arrow jumps; plain arrows step
        Key::Left if mods.command => movement(Motion::LineStart),
        Key::Right if mods.command => movement(Motion::LineEnd),
        Key::Up if mods.command => movement(Motion::BufferStart),
        Key::Down if mods.command => movement(Motion::BufferEnd),
        Key::Left => movement(Motion::Left),
        Key::Right => movement(Motion::Right),
        Key::Up => movement(Motion::Up),
        Key::Down => movement(Motion::Down),

        Key::Home => movement(Motion::LineStart),
        Key::End => movement(Motion::LineEnd),

        // Emacs-style Ctrl bindings
        Key::Char('a') if mods.control && !mods.command => movement(Motion::LineStart),
        Key::Char('e') if mods.control && !mods.command => movement(Motion::LineEnd),

        // Cmd+A selects all
        Key::Char('a') if mods.command && !mods.control => Some(EditCommand::SelectAll),

        // Unhandled
        _ => None,
    }
}

/// Executes an editing command against a buffer.
pub fn apply_command(buffer: &mut LineBuffer, command: EditCommand) {
    match command {
        EditCommand::InsertChar(ch) => buffer.insert_char(ch),
        EditCommand::DeleteBackward => buffer.delete_backward(),
        EditCommand::DeleteForward => buffer.delete_forward(),
        EditCommand::SelectAll => buffer.select_all(),
        EditCommand::Move { motion, select } => {
            if select {
                if buffer.selection_anchor().is_none() {
                    buffer.set_selection_anchor_at_cursor();
                }
            } else {
                buffer.clear_selection();
            }
            match motion {
                Motion::Left => buffer.move_left(),
                Motion::Right => buffer.move_right(),
                Motion::Up => buffer.move_up(),
                Motion::Down => buffer.move_down(),
                Motion::LineStart => buffer.move_to_line_start(),
                Motion::LineEnd => buffer.move_to_line_end(),
                Motion::BufferStart => buffer.move_to_buffer_start(),
                Motion::BufferEnd => buffer.move_to_buffer_end(),
            }
        }
    }
}
