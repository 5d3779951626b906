// Chunk: docs/chunks/process_session - Child process session and stream readers
//! Event types for stream reader communication.
//!
//! This module defines the events that flow from the two stream reader
//! threads to the owning thread via a crossbeam channel.

use std::io;

/// Which of the child's output streams an event came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    /// Short label for logging.
    pub fn label(self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

/// Events sent from a stream reader thread to the session owner.
///
/// Ordering is FIFO per stream (each reader owns one sender); no ordering is
/// guaranteed between the two streams.
#[derive(Debug)]
pub enum SessionEvent {
    /// New bytes read from one of the child's streams.
    Output(StreamKind, Vec<u8>),
    /// The stream reached end-of-stream; its reader has terminated.
    Eof(StreamKind),
    /// Reading the stream failed; its reader has terminated.
    ///
    /// This is local to one stream: the session stays half-alive as long as
    /// the other stream is still open.
    ReadError(StreamKind, io::Error),
}
