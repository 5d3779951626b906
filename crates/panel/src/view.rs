// Chunk: docs/chunks/panel_view_contract - Host-facing embeddable view contract
//!
//! The contract any embeddable panel satisfies toward its host.
//!
//! The host application owns the window, the frame clock, and the native
//! event sources; a panel is a named region the host updates, draws, and
//! forwards events into. This trait is the whole surface: hosts hold a
//! `Box<dyn PanelView>` and never learn what is behind it.

use replpad_input::{KeyEvent, MouseEvent, ScrollDelta};

use crate::focus::Handled;
use crate::render::Painter;

/// An embeddable, named view.
pub trait PanelView {
    /// Display name for tabs and title bars.
    fn name(&self) -> String;

    /// Advances internal state: drains pending events, applies deferred
    /// scrolling. Called once per host frame, and again on wakeup signals.
    fn update(&mut self);

    /// Draws the view through the host's painter.
    fn draw(&self, painter: &mut dyn Painter);

    /// Informs the view of its viewport size in pixels.
    fn set_viewport(&mut self, width: f64, height: f64);

    /// Offers a keyboard event. Returns whether the view consumed it.
    fn handle_key(&mut self, event: KeyEvent) -> Handled;

    /// Delivers committed text input (typing, IME commit, paste).
    fn handle_text_input(&mut self, text: &str);

    /// Offers a pointer event.
    fn handle_mouse(&mut self, event: MouseEvent);

    /// Offers a scroll event.
    fn handle_scroll(&mut self, delta: ScrollDelta);
}
