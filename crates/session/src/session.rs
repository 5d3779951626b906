// Chunk: docs/chunks/process_session - Child process session and stream readers
//! The session: child process handle, liveness, and the drain path.
//!
//! `Session` owns the child exclusively. Its reader threads never touch
//! shared state - they only send chunks over the channel - so every mutation
//! of the merge state and the liveness flags happens on the owner thread,
//! inside [`Session::drain_events`]. That is the single-mutator invariant
//! this design depends on.

use std::path::Path;
use std::sync::Arc;

use replpad_input::WakeupSignal;
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::event::{SessionEvent, StreamKind};
use crate::merge::{NewlineCoalescer, Utf8Chunker};
use crate::process::ChildHandle;

/// Per-stream decode + merge state.
///
/// Each output stream carries its own UTF-8 partial and its own pending
/// newline buffer; the two streams share only the destination cell.
#[derive(Debug, Default)]
struct StreamAssembler {
    chunker: Utf8Chunker,
    coalescer: NewlineCoalescer,
    open: bool,
}

/// A live (or recently dead) child process session.
///
/// Liveness follows the streams, not the process table: once both output
/// streams have signaled end-of-stream, the session is closed and writes are
/// rejected, even if process reaping is still pending.
#[derive(Debug)]
pub struct Session {
    child: ChildHandle,
    command: String,
    stdout: StreamAssembler,
    stderr: StreamAssembler,
    exit_code: Option<i32>,
    /// The one bounded exit wait has been spent.
    exit_waited: bool,
}

impl Session {
    /// Launches `program` with `args` in `cwd` and starts both reader
    /// threads.
    ///
    /// Spawn failure is returned, never swallowed - the caller surfaces it.
    pub fn spawn(
        program: &str,
        args: &[String],
        cwd: &Path,
        wakeup: Arc<dyn WakeupSignal>,
    ) -> Result<Self, SessionError> {
        let child =
            ChildHandle::spawn(program, args, cwd, wakeup).map_err(|source| SessionError::Spawn {
                command: program.to_string(),
                source,
            })?;

        Ok(Session {
            child,
            command: program.to_string(),
            stdout: StreamAssembler {
                open: true,
                ..Default::default()
            },
            stderr: StreamAssembler {
                open: true,
                ..Default::default()
            },
            exit_code: None,
            exit_waited: false,
        })
    }

    /// Returns true while at least one output stream is still open.
    pub fn is_alive(&self) -> bool {
        self.stdout.open || self.stderr.open
    }

    /// The child's exit code, once known.
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// The command this session was launched with.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The child's process id.
    pub fn process_id(&self) -> u32 {
        self.child.process_id()
    }

    /// The held-back trailing newlines for one stream (not yet visible).
    pub fn pending_newlines(&self, kind: StreamKind) -> &str {
        self.assembler(kind).coalescer.pending()
    }

    /// Discards both pending newline buffers.
    ///
    /// The submit protocol calls this when it opens a fresh output cell:
    /// trailing blank lines of the finished cell are dropped.
    pub fn reset_pending_newlines(&mut self) {
        self.stdout.coalescer.reset();
        self.stderr.coalescer.reset();
    }

    /// Writes one logical line to the child's stdin.
    ///
    /// A multi-line submission is collapsed to a single line first: each
    /// internal terminator run becomes one space, and exactly one `\n` is
    /// appended. Fails with [`SessionError::Closed`] when the session has
    /// ended.
    pub fn write_line(&mut self, text: &str) -> Result<(), SessionError> {
        if !self.is_alive() {
            warn!(command = %self.command, "write_line on closed session");
            return Err(SessionError::Closed);
        }

        let payload = collapse_submission(text);
        debug!(bytes = payload.len(), "writing submission to child stdin");
        self.child.write(payload.as_bytes()).map_err(|source| {
            if source.kind() == std::io::ErrorKind::BrokenPipe {
                SessionError::Closed
            } else {
                SessionError::Write { source }
            }
        })
    }

    /// Drains all reader events without blocking, committing merged text to
    /// `sink`.
    ///
    /// `sink` receives `(stream, committed_text)` in per-stream order;
    /// interleaving across the two streams is whatever order the readers
    /// delivered. Returns true if anything was processed (output, EOF, or a
    /// read error) - callers use this to set their redraw flag.
    pub fn drain_events(&mut self, sink: &mut dyn FnMut(StreamKind, &str)) -> bool {
        let mut processed = false;

        while let Some(event) = self.child.try_recv() {
            processed = true;
            match event {
                SessionEvent::Output(kind, bytes) => {
                    let assembler = self.assembler_mut(kind);
                    let text = assembler.chunker.feed(&bytes);
                    if let Some(commit) = assembler.coalescer.feed(&text) {
                        sink(kind, &commit);
                    }
                }
                SessionEvent::Eof(kind) => {
                    self.assembler_mut(kind).open = false;
                }
                SessionEvent::ReadError(kind, err) => {
                    // Local to this stream; the session stays half-alive if
                    // the other stream is still open.
                    warn!(stream = kind.label(), %err, "stream reader failed");
                    self.assembler_mut(kind).open = false;
                }
            }
        }

        if !self.is_alive() && self.exit_code.is_none() {
            // Both streams closed; give the child a bounded moment to become
            // reapable so the exit code is available on this same drain. A
            // child that closed its streams but lives on only pays this once.
            self.exit_code = if self.exit_waited {
                self.child.try_wait()
            } else {
                self.exit_waited = true;
                self.child.wait_timeout(std::time::Duration::from_millis(100))
            };
            if let Some(code) = self.exit_code {
                debug!(code, "session child exited");
            }
        }

        processed
    }

    /// Requests graceful termination of the child. Idempotent.
    pub fn terminate(&mut self) {
        self.child.terminate();
    }

    fn assembler(&self, kind: StreamKind) -> &StreamAssembler {
        match kind {
            StreamKind::Stdout => &self.stdout,
            StreamKind::Stderr => &self.stderr,
        }
    }

    fn assembler_mut(&mut self, kind: StreamKind) -> &mut StreamAssembler {
        match kind {
            StreamKind::Stdout => &mut self.stdout,
            StreamKind::Stderr => &mut self.stderr,
        }
    }
}

/// Collapses a multi-line submission into one transmitted line.
///
/// Internal line terminators (each `\n`, with an optional preceding `\r`)
/// become a single space; exactly one `\n` is appended at the end. The child
/// therefore always receives one logical line per submission.
pub fn collapse_submission(text: &str) -> String {
    let trimmed = text.trim_end_matches(['\n', '\r']);
    let mut out = String::with_capacity(trimmed.len() + 1);
    for (i, line) in trimmed.split('\n').enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(line.trim_end_matches('\r'));
    }
    out.push('\n');
    out
}
