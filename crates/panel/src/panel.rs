// Chunk: docs/chunks/cell_panel - Cell model, layout engine, and panel controller
//!
//! The panel controller: session + cells + layout, wired together.
//!
//! `ReplPanel` is the composition root. It owns the session (exclusively),
//! the cell sequence, and the scroll state; routes input events to the
//! focused cell; implements the submit protocol; and exposes the whole
//! thing to the host through [`PanelView`].
//!
//! All session events are drained on the owner thread inside [`update`], so
//! cell mutation is single-threaded by construction even though the stream
//! readers run on their own threads.
//!
//! [`update`]: ReplPanel::update

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use replpad_input::{Key, KeyEvent, MouseEvent, MouseEventKind, NullWakeup, ScrollDelta, WakeupSignal};
use replpad_session::{Session, SessionError};
use tracing::{debug, error, warn};
use unicode_width::UnicodeWidthStr;

use crate::cell::{Cell, CellRole};
use crate::config::PanelConfig;
use crate::focus::{apply_command, resolve_command, Handled};
use crate::layout::{clamp_scroll, content_height, hit_test, layout_cells, reveal_bottom_offset, Rect};
use crate::render::{FillKind, Painter, StrokeKind, TextKind};
use crate::sequence::CellSequence;
use crate::view::PanelView;

/// The interactive-session panel.
pub struct ReplPanel {
    config: PanelConfig,
    /// `None` when the session failed to start or was torn down.
    session: Option<Session>,
    cells: CellSequence,
    /// Content-space y at the viewport top.
    scroll_offset: f64,
    /// Viewport size in pixels (width, height).
    viewport: (f64, f64),
    /// New output arrived since the last update; reveal it once.
    pending_output: bool,
    /// User-visible status line (spawn failure, session closed).
    status: Option<String>,
    wakeup: Arc<dyn WakeupSignal>,
}

impl ReplPanel {
    /// Creates a panel and starts its session.
    ///
    /// A spawn failure does not fail construction: the panel comes up inert,
    /// with the error in the banner cell and the status line. The user sees
    /// what happened and the host keeps a drawable, closable view.
    pub fn new(config: PanelConfig) -> Self {
        Self::with_wakeup(config, Arc::new(NullWakeup))
    }

    /// Creates a panel whose reader threads nudge `wakeup` on new output.
    pub fn with_wakeup(config: PanelConfig, wakeup: Arc<dyn WakeupSignal>) -> Self {
        let cwd = working_dir(&config);
        let (session, banner, status) = match Session::spawn(
            &config.command,
            &config.args,
            &cwd,
            Arc::clone(&wakeup),
        ) {
            Ok(session) => (Some(session), config.banner.clone(), None),
            Err(err) => {
                error!(%err, command = %config.command, "session failed to start");
                let banner = if config.banner.is_empty() {
                    err.to_string()
                } else {
                    format!("{}\n{}", config.banner, err)
                };
                (None, banner, Some(err.to_string()))
            }
        };

        ReplPanel {
            cells: CellSequence::new(&banner),
            session,
            scroll_offset: 0.0,
            viewport: (640.0, 480.0),
            pending_output: false,
            status,
            config,
            wakeup,
        }
    }

    // ==================== Accessors ====================

    /// The cell sequence, for hosts that render or inspect it directly.
    pub fn cells(&self) -> &CellSequence {
        &self.cells
    }

    /// True while the session can still accept submissions.
    pub fn is_alive(&self) -> bool {
        self.session.as_ref().map(Session::is_alive).unwrap_or(false)
    }

    /// The current status line, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Current scroll offset in content-space pixels.
    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Idle poll interval for hosts without a wakeup-driven run loop.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.config.poll_interval_ms)
    }

    /// Resolves which cell is under a viewport-space point.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<usize> {
        let rects = self.layout();
        hit_test(&rects, self.scroll_offset, x, y)
    }

    // ==================== Update ====================

    /// Drains session events into the trailing output cell and consumes the
    /// pending-output flag into a scroll-to-reveal.
    pub fn update(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let was_alive = session.is_alive();
        if !was_alive {
            return;
        }

        let cell = self.cells.trailing_output_mut();
        let mut appended = false;
        session.drain_events(&mut |_stream, text| {
            cell.append_output(text);
            appended = true;
        });
        if appended && self.config.scrollback_lines > 0 {
            cell.cap_scrollback(self.config.scrollback_lines);
        }

        if !session.is_alive() {
            // Both streams closed this frame: the session just ended.
            let notice = match session.exit_code() {
                Some(code) => format!("[process exited with code {code}]"),
                None => "[process exited]".to_string(),
            };
            self.cells.trailing_output_mut().append_notice(&notice);
            self.status = Some("session closed".to_string());
            appended = true;
        }

        if appended {
            self.pending_output = true;
        }
        if self.pending_output {
            self.reveal(self.cells.trailing_output_index());
            self.pending_output = false;
        }
    }

    // ==================== Submit protocol ====================

    /// Submits the current input: freezes it, opens a fresh output/input
    /// pair, and sends the collapsed text to the child.
    ///
    /// While the session is closed this is a reported no-op: the sequence is
    /// untouched and [`SessionError::Closed`] is returned.
    pub fn submit(&mut self) -> Result<(), SessionError> {
        let Some(session) = self.session.as_mut() else {
            self.status = Some("session is closed".to_string());
            return Err(SessionError::Closed);
        };
        if !session.is_alive() {
            self.status = Some("session is closed".to_string());
            return Err(SessionError::Closed);
        }

        let input_index = self.cells.trailing_input_index();
        let text = self
            .cells
            .cell(input_index)
            .map(|cell| cell.content())
            .unwrap_or_default();

        // Rotation first: freeze, open the new pair, drop held newlines so
        // the fresh output cell starts clean.
        let reveal_index = self.cells.push_exchange();
        session.reset_pending_newlines();
        self.pending_output = false;

        debug!(chars = text.len(), "submitting input");
        let result = session.write_line(&text);
        if let Err(ref err) = result {
            warn!(%err, "submission write failed");
            self.status = Some(err.to_string());
        }

        self.reveal(reveal_index);
        result
    }

    /// Tears down the current session (if any) and starts a fresh one,
    /// appending a new banner/input pair.
    pub fn restart(&mut self) -> Result<(), SessionError> {
        if let Some(mut session) = self.session.take() {
            session.terminate();
        }
        self.pending_output = false;

        let reveal_index = self.cells.push_exchange();
        let cwd = working_dir(&self.config);
        match Session::spawn(
            &self.config.command,
            &self.config.args,
            &cwd,
            Arc::clone(&self.wakeup),
        ) {
            Ok(session) => {
                self.session = Some(session);
                self.status = None;
                if !self.config.banner.is_empty() {
                    let banner = self.config.banner.clone();
                    self.cells.trailing_output_mut().append_output(&banner);
                }
                self.reveal(reveal_index);
                Ok(())
            }
            Err(err) => {
                error!(%err, "session restart failed");
                self.cells.trailing_output_mut().append_notice(&err.to_string());
                self.status = Some(err.to_string());
                self.reveal(reveal_index);
                Err(err)
            }
        }
    }

    /// Requests graceful termination of the session's child process.
    pub fn terminate(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.terminate();
        }
    }

    // ==================== Event routing ====================

    /// Routes a keyboard event.
    pub fn handle_key(&mut self, event: KeyEvent) -> Handled {
        match event.key {
            Key::Return => {
                if event.modifiers.is_empty() && self.config.submit_on_plain_return {
                    let _ = self.submit();
                    return Handled::Yes;
                }
                // Shift+Return (or plain Return when submission is bound
                // externally) inserts a newline into the input.
                if let Some(buffer) = self
                    .cells
                    .focused_editable_mut()
                    .and_then(|cell| cell.buffer_mut())
                {
                    buffer.insert_newline();
                    return Handled::Yes;
                }
                Handled::No
            }
            Key::PageUp => {
                self.scroll_by(-self.viewport.1 * 0.9);
                Handled::Yes
            }
            Key::PageDown => {
                self.scroll_by(self.viewport.1 * 0.9);
                Handled::Yes
            }
            _ => {
                let Some(command) = resolve_command(&event) else {
                    return Handled::No;
                };
                if let Some(buffer) = self
                    .cells
                    .focused_editable_mut()
                    .and_then(|cell| cell.buffer_mut())
                {
                    apply_command(buffer, command);
                    Handled::Yes
                } else {
                    // Focus sits on frozen history; edits are dropped.
                    Handled::No
                }
            }
        }
    }

    /// Delivers committed text (typing, IME, paste) to the editable input.
    pub fn handle_text_input(&mut self, text: &str) {
        if let Some(buffer) = self
            .cells
            .focused_editable_mut()
            .and_then(|cell| cell.buffer_mut())
        {
            buffer.insert_str(text);
        }
    }

    /// Routes a pointer event. A press inside a cell moves focus there.
    pub fn handle_mouse(&mut self, event: MouseEvent) {
        if event.kind != MouseEventKind::Down {
            return;
        }
        let (x, y) = event.position;
        if let Some(index) = self.cell_at(x, y) {
            self.cells.set_active(index);
        }
    }

    /// Applies a scroll event to the panel viewport.
    pub fn handle_scroll(&mut self, delta: ScrollDelta) {
        self.scroll_by(delta.dy);
    }

    // ==================== Drawing ====================

    /// Draws the panel through the host's painter.
    pub fn draw(&self, painter: &mut dyn Painter) {
        let metrics = &self.config.metrics;
        let rects = self.layout();

        for (index, (cell, rect)) in self.cells.iter().zip(&rects).enumerate() {
            let screen_y = rect.y - self.scroll_offset;
            if screen_y + rect.height < 0.0 || screen_y > self.viewport.1 {
                continue;
            }
            let screen = Rect::new(rect.x, screen_y, rect.width, rect.height);

            let fill = match cell.role() {
                CellRole::Output => FillKind::OutputCell,
                CellRole::Input => FillKind::InputCell,
            };
            painter.fill_rect(screen, fill);

            let stroke = if index == self.cells.active_index() {
                StrokeKind::ActiveCellBorder
            } else {
                StrokeKind::CellBorder
            };
            painter.stroke_rect(screen, stroke);

            let text_kind = match cell.role() {
                CellRole::Output => TextKind::Output,
                CellRole::Input => TextKind::Input,
            };
            for (line_index, line) in cell.buffer().lines().enumerate() {
                let line_y = screen_y + metrics.padding + line_index as f64 * metrics.line_height;
                if line_y + metrics.line_height < 0.0 || line_y > self.viewport.1 {
                    continue;
                }
                painter.draw_text_line(rect.x + metrics.padding, line_y, line, text_kind);
            }

            if index == self.cells.active_index() && cell.is_editable() {
                self.draw_caret(painter, cell, &screen);
            }
        }

        if let Some(status) = &self.status {
            painter.draw_text_line(
                metrics.margin,
                self.viewport.1 - metrics.line_height,
                status,
                TextKind::Status,
            );
        }
    }

    /// Draws the caret of the focused input cell.
    fn draw_caret(&self, painter: &mut dyn Painter, cell: &Cell, screen: &Rect) {
        let metrics = &self.config.metrics;
        let position = cell.buffer().cursor_position();
        let line = cell.buffer().line_content(position.line);
        let prefix: String = line.chars().take(position.col).collect();
        let caret_x = screen.x
            + metrics.padding
            + UnicodeWidthStr::width(prefix.as_str()) as f64 * metrics.char_width;
        let caret_y = screen.y + metrics.padding + position.line as f64 * metrics.line_height;
        painter.fill_rect(
            Rect::new(caret_x, caret_y, 1.0, metrics.line_height),
            FillKind::Caret,
        );
    }

    // ==================== Geometry ====================

    /// Informs the panel of its viewport size.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = (width, height);
        self.clamp_scroll_offset();
    }

    fn layout(&self) -> Vec<Rect> {
        layout_cells(
            &self.cells.line_counts(),
            &self.config.metrics,
            self.viewport.0,
        )
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scroll_offset += dy;
        self.clamp_scroll_offset();
    }

    fn clamp_scroll_offset(&mut self) {
        let rects = self.layout();
        let total = content_height(&rects, &self.config.metrics);
        self.scroll_offset = clamp_scroll(self.scroll_offset, total, self.viewport.1);
    }

    /// Scrolls so the given cell's bottom edge sits at the viewport bottom.
    fn reveal(&mut self, index: usize) {
        let rects = self.layout();
        let Some(rect) = rects.get(index) else {
            return;
        };
        let total = content_height(&rects, &self.config.metrics);
        let offset = reveal_bottom_offset(rect, self.viewport.1);
        self.scroll_offset = clamp_scroll(offset, total, self.viewport.1);
    }
}

impl PanelView for ReplPanel {
    fn name(&self) -> String {
        format!("repl: {}", self.config.command)
    }

    fn update(&mut self) {
        ReplPanel::update(self);
    }

    fn draw(&self, painter: &mut dyn Painter) {
        ReplPanel::draw(self, painter);
    }

    fn set_viewport(&mut self, width: f64, height: f64) {
        ReplPanel::set_viewport(self, width, height);
    }

    fn handle_key(&mut self, event: KeyEvent) -> Handled {
        ReplPanel::handle_key(self, event)
    }

    fn handle_text_input(&mut self, text: &str) {
        ReplPanel::handle_text_input(self, text);
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        ReplPanel::handle_mouse(self, event);
    }

    fn handle_scroll(&mut self, delta: ScrollDelta) {
        ReplPanel::handle_scroll(self, delta);
    }
}

/// Resolves the session working directory from the config.
fn working_dir(config: &PanelConfig) -> PathBuf {
    config
        .cwd
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
