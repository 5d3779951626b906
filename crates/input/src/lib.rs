// Chunk: docs/chunks/panel_input_types - Shared input event types
//!
//! Input event types for keyboard, pointer, and scroll handling.
//!
//! These types abstract over the host application's native event details and
//! provide a clean Rust-native interface for input handling. This crate is
//! shared between the panel and session crates to avoid circular dependencies:
//! the panel routes these events to cells, and the session crate only needs
//! [`WakeupSignal`] to nudge the host run loop from its reader threads.

/// A keyboard event.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    /// The key that was pressed
    pub key: Key,
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Creates a new KeyEvent with the given key and modifiers.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// Creates a KeyEvent for a single character with no modifiers.
    pub fn char(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers::default(),
        }
    }

    /// Creates a KeyEvent for a single character with shift held.
    pub fn char_shifted(ch: char) -> Self {
        Self {
            key: Key::Char(ch),
            modifiers: Modifiers {
                shift: true,
                ..Default::default()
            },
        }
    }
}

/// Modifier keys that can be held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Shift key
    pub shift: bool,
    /// Command key (Cmd/⌘)
    pub command: bool,
    /// Option key (Alt/⌥)
    pub option: bool,
    /// Control key (Ctrl/⌃)
    pub control: bool,
}

impl Modifiers {
    /// Returns true if no modifier keys are held.
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.command && !self.option && !self.control
    }

    /// Returns true if only shift is held (for uppercase letters).
    pub fn is_shift_only(&self) -> bool {
        self.shift && !self.command && !self.option && !self.control
    }
}

/// Keys that can be pressed.
///
/// This is the subset the panel routes: printable characters, line editing,
/// and navigation. Host-specific keys the panel never consumes (function
/// keys, media keys) are simply not delivered to it.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    /// A printable character (already accounts for shift state)
    Char(char),
    /// Backspace / Delete backward
    Backspace,
    /// Forward delete
    Delete,
    /// Return / Enter
    Return,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Home key
    Home,
    /// End key
    End,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Page Up
    PageUp,
    /// Page Down
    PageDown,
}

/// Scroll delta from trackpad or mouse wheel.
///
/// The `mouse_position` field is used by the panel to decide which cell is
/// under the pointer when a scroll arrives. When `mouse_position` is `Some`,
/// scroll routing uses hit-testing against the cell rectangles rather than
/// always targeting the focused cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollDelta {
    /// Horizontal scroll amount (positive = right)
    pub dx: f64,
    /// Vertical scroll amount (positive = down)
    pub dy: f64,
    /// Mouse position at the time of the scroll event, in view coordinates
    /// (pixels, origin at top-left, y increasing downward).
    pub mouse_position: Option<(f64, f64)>,
}

impl ScrollDelta {
    /// Creates a new ScrollDelta with no mouse position.
    ///
    /// Use this for programmatic scroll events or when mouse position is
    /// unavailable.
    pub fn new(dx: f64, dy: f64) -> Self {
        Self {
            dx,
            dy,
            mouse_position: None,
        }
    }

    /// Creates a new ScrollDelta with a mouse position.
    ///
    /// The position should be in view coordinates (pixels from top-left).
    pub fn with_position(dx: f64, dy: f64, x: f64, y: f64) -> Self {
        Self {
            dx,
            dy,
            mouse_position: Some((x, y)),
        }
    }
}

/// A pointer (mouse/trackpad) event.
#[derive(Debug, Clone, PartialEq)]
pub struct MouseEvent {
    /// The type of mouse event
    pub kind: MouseEventKind,
    /// Position in view coordinates (pixels from top-left)
    pub position: (f64, f64),
    /// Modifier keys held during the event
    pub modifiers: Modifiers,
    /// Number of consecutive clicks (1 for single, 2 for double, etc.)
    pub click_count: u32,
}

impl MouseEvent {
    /// Creates a single-click press at the given position with no modifiers.
    pub fn press(x: f64, y: f64) -> Self {
        Self {
            kind: MouseEventKind::Down,
            position: (x, y),
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }
}

/// Kind of mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    /// Mouse button pressed
    Down,
    /// Mouse button released
    Up,
    /// Mouse moved (with button held for drag)
    Moved,
}

// =============================================================================
// WakeupSignal
// =============================================================================

/// A signal used by background threads to wake the host run loop.
///
/// The session crate's stream reader threads call [`WakeupSignal::signal`]
/// after pushing a chunk onto the event channel, so the host can drain and
/// redraw promptly instead of waiting for its next timer tick. The host's
/// event sender implements this trait; a no-op implementation is fine for
/// hosts that poll on a fixed interval.
pub trait WakeupSignal: Send + Sync {
    /// Requests that the host run loop wake up and process pending events.
    ///
    /// Must be cheap and non-blocking; may be called from any thread, and
    /// may be called redundantly (implementations are expected to debounce).
    fn signal(&self);
}

/// A `WakeupSignal` that does nothing.
///
/// For hosts that drive the panel purely by polling `update()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullWakeup;

impl WakeupSignal for NullWakeup {
    fn signal(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_event_char() {
        let event = KeyEvent::char('a');
        assert_eq!(event.key, Key::Char('a'));
        assert!(event.modifiers.is_empty());
    }

    #[test]
    fn test_key_event_char_shifted() {
        let event = KeyEvent::char_shifted('A');
        assert_eq!(event.key, Key::Char('A'));
        assert!(event.modifiers.is_shift_only());
    }

    #[test]
    fn test_modifiers_is_empty() {
        let empty = Modifiers::default();
        assert!(empty.is_empty());

        let with_shift = Modifiers {
            shift: true,
            ..Default::default()
        };
        assert!(!with_shift.is_empty());
    }

    #[test]
    fn test_mouse_press_helper() {
        let event = MouseEvent::press(10.0, 20.0);
        assert_eq!(event.kind, MouseEventKind::Down);
        assert_eq!(event.position, (10.0, 20.0));
        assert_eq!(event.click_count, 1);
    }
}
