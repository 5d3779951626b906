// Chunk: docs/chunks/process_session - Child process session and stream readers
//! Session error taxonomy.
//!
//! Stream-level read failures are *not* represented here - they are local to
//! one reader thread, reported as [`SessionEvent::ReadError`] and logged;
//! the session keeps running on the surviving stream. This enum covers the
//! session-level failures a caller must react to.
//!
//! [`SessionEvent::ReadError`]: crate::SessionEvent::ReadError

use std::io;

use thiserror::Error;

/// Errors surfaced by the session to its caller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The child process could not be launched.
    ///
    /// Callers must present this to the user - a panel with no session is
    /// fine, a panel that pretends to have one is not.
    #[error("failed to launch `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// An operation was attempted after the session ended.
    #[error("session is closed")]
    Closed,

    /// Writing to the child's stdin failed even though the session looked
    /// alive.
    #[error("failed to write to child stdin: {source}")]
    Write {
        #[source]
        source: io::Error,
    },
}
