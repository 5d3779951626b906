// Chunk: docs/chunks/cell_panel - Cell model, layout engine, and panel controller

//! replpad: an embeddable REPL notebook panel.
//!
//! The panel spawns a long-running child process and displays its combined
//! stdout/stderr stream interleaved with the user's submissions, as a
//! vertically stacked sequence of alternating output and input cells. It is
//! designed to be embedded in a larger text-editing application: the host
//! owns the window, frame clock, theme, and event sources; the panel owns
//! the session, the cells, and their geometry.
//!
//! # Structure
//!
//! - [`ReplPanel`]: the composition root, implementing [`PanelView`]
//! - [`CellSequence`] / [`Cell`]: the ordered output/input blocks
//! - [`layout`]: pure geometry (stacked rectangles, hit testing, reveal)
//! - [`Painter`]: the host-implemented drawing contract
//! - [`PanelConfig`]: JSON-backed configuration
//!
//! # Example
//!
//! ```no_run
//! use replpad::{PanelConfig, PanelView, ReplPanel};
//!
//! let mut panel = ReplPanel::new(PanelConfig::for_command(
//!     "python3",
//!     vec!["-i".to_string(), "-q".to_string()],
//! ));
//! panel.set_viewport(800.0, 600.0);
//!
//! // Host frame loop:
//! panel.update();
//! // panel.draw(&mut my_painter);
//! ```

mod cell;
mod config;
mod focus;
pub mod layout;
mod panel;
mod render;
mod sequence;
mod view;

pub use cell::{Cell, CellRole};
pub use config::PanelConfig;
pub use focus::{apply_command, resolve_command, EditCommand, Handled, Motion};
pub use layout::{LayoutMetrics, Rect};
pub use panel::ReplPanel;
pub use render::{FillKind, PaintOp, Painter, RecordingPainter, StrokeKind, TextKind};
pub use sequence::CellSequence;
pub use view::PanelView;

// Re-export the session error type: hosts match on it when surfacing
// submit/spawn failures.
pub use replpad_session::SessionError;
