// Chunk: docs/chunks/cell_panel_render - Painter contract for panel drawing
//!
//! The rendering contract between the panel and its host.
//!
//! The panel owns *what* to draw - cell backgrounds, borders, text lines,
//! the caret - and the host owns *how*: the [`Painter`] implementation maps
//! semantic paint kinds to its theme and font machinery. Keeping the kinds
//! semantic (rather than raw colors) lets the host restyle the panel without
//! the panel knowing about themes at all.

use crate::layout::Rect;

/// Semantic fill styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    /// Background of an output cell.
    OutputCell,
    /// Background of an input cell.
    InputCell,
    /// The text caret in the focused input cell.
    Caret,
}

/// Semantic border styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    /// Border of an unfocused cell.
    CellBorder,
    /// Border of the focused cell.
    ActiveCellBorder,
}

/// Semantic text styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Process output text.
    Output,
    /// User input text.
    Input,
    /// Panel status line (spawn failures, session closed).
    Status,
}

/// Host-implemented drawing surface.
///
/// Coordinates are viewport-space pixels (the panel has already applied its
/// scroll offset). Calls arrive back-to-front within one `draw` pass.
pub trait Painter {
    /// Draws a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, kind: FillKind);
    /// Draws a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, kind: StrokeKind);
    /// Draws one line of text with its top-left corner at (x, y).
    fn draw_text_line(&mut self, x: f64, y: f64, text: &str, kind: TextKind);
}

/// A [`Painter`] that records every call. Test double.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    pub ops: Vec<PaintOp>,
}

/// One recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    Fill(Rect, FillKind),
    Stroke(Rect, StrokeKind),
    Text { x: f64, y: f64, text: String, kind: TextKind },
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded text lines of the given kind, in draw order.
    pub fn text_lines(&self, kind: TextKind) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PaintOp::Text { text, kind: k, .. } if *k == kind => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Painter for RecordingPainter {
    fn fill_rect(&mut self, rect: Rect, kind: FillKind) {
        self.ops.push(PaintOp::Fill(rect, kind));
    }

    fn stroke_rect(&mut self, rect: Rect, kind: StrokeKind) {
        self.ops.push(PaintOp::Stroke(rect, kind));
    }

    fn draw_text_line(&mut self, x: f64, y: f64, text: &str, kind: TextKind) {
        self.ops.push(PaintOp::Text {
            x,
            y,
            text: text.to_string(),
            kind,
        });
    }
}
