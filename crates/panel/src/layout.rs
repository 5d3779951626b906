// Chunk: docs/chunks/cell_layout - Variable-height cell layout and hit testing
//!
//! The layout engine: cell line counts in, stacked rectangles out.
//!
//! Geometry is derived, never stored. Every layout pass recomputes each
//! cell's rectangle from its current line count, the shared metrics, and the
//! viewport width; the scroll offset is applied only at hit-test and draw
//! time. This is pure arithmetic with no platform dependencies, so it is
//! fully testable without mocking.
//!
//! Coordinate model: content space has its origin at the top of the first
//! cell's margin and grows downward. `scroll_offset` is the content-space y
//! sitting at the viewport top, so `screen_y = content_y - scroll_offset`.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if the point lies inside this rectangle.
    ///
    /// Edges follow the half-open convention: the top/left edge is inside,
    /// the bottom/right edge is not - adjacent rectangles never both claim
    /// a boundary point.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// The content-space y of the bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Shared layout metrics for all cells in a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    /// Height of one text line in pixels.
    pub line_height: f64,
    /// Advance width of one monospace column in pixels.
    pub char_width: f64,
    /// Gap above, below, and between cells, and at the left/right edges.
    pub margin: f64,
    /// Inner padding between a cell's border and its text.
    pub padding: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            line_height: 18.0,
            char_width: 9.0,
            margin: 8.0,
            padding: 4.0,
        }
    }
}

/// Computes the content-space rectangle of every cell.
///
/// Cells are stacked top to bottom starting at `margin`, separated by
/// `margin`, each `line_count * line_height + 2 * padding` tall and as wide
/// as the viewport minus the horizontal margins. Rectangles never overlap
/// for any line counts because each one starts a positive gap below the
/// previous one.
pub fn layout_cells(line_counts: &[usize], metrics: &LayoutMetrics, viewport_width: f64) -> Vec<Rect> {
    let width = (viewport_width - 2.0 * metrics.margin).max(0.0);
    let mut rects = Vec::with_capacity(line_counts.len());
    let mut y = metrics.margin;
    for &lines in line_counts {
        let height = lines as f64 * metrics.line_height + 2.0 * metrics.padding;
        rects.push(Rect::new(metrics.margin, y, width, height));
        y += height + metrics.margin;
    }
    rects
}

/// Total content height covered by `rects`, including the trailing margin.
pub fn content_height(rects: &[Rect], metrics: &LayoutMetrics) -> f64 {
    rects
        .last()
        .map(|r| r.bottom() + metrics.margin)
        .unwrap_or(0.0)
}

/// Returns the index of the cell containing the viewport-space point, if any.
///
/// The point is translated into content space by the scroll offset before
/// testing. Rectangles are disjoint, so at most one cell matches; the scan
/// returns the first (and only) hit.
pub fn hit_test(rects: &[Rect], scroll_offset: f64, x: f64, y: f64) -> Option<usize> {
    let content_y = y + scroll_offset;
    rects.iter().position(|r| r.contains(x, content_y))
}

/// Scroll offset that places `rect`'s bottom edge at the viewport bottom.
///
/// Clamped at zero: a cell already fully visible near the top never scrolls
/// the view backwards past the content start.
pub fn reveal_bottom_offset(rect: &Rect, viewport_height: f64) -> f64 {
    (rect.bottom() - viewport_height).max(0.0)
}

/// Clamps a scroll offset to the valid range for the given content height.
///
/// The maximum keeps the content bottom pinned to the viewport bottom once
/// everything shorter than the viewport fits without scrolling.
pub fn clamp_scroll(offset: f64, content_height: f64, viewport_height: f64) -> f64 {
    let max = (content_height - viewport_height).max(0.0);
    offset.clamp(0.0, max)
}
