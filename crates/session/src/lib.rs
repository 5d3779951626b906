// Chunk: docs/chunks/process_session - Child process session and stream readers

//! replpad-session: child process session management for replpad.
//!
//! This crate owns everything between "spawn a child process" and "text
//! appears in the panel": the process handle, one blocking reader thread per
//! output stream (stdout and stderr stay independently piped), the channel
//! the readers feed, incremental UTF-8 decoding, and the newline-coalescing
//! merge that keeps chunked reads visually stable.
//!
//! # Architecture
//!
//! ```text
//! child stdout ──reader thread──┐
//!                               ├──→ crossbeam channel ──→ Session::drain_events
//! child stderr ──reader thread──┘         (+ WakeupSignal nudge)        │
//!                                                                       ▼
//!                                             Utf8Chunker → NewlineCoalescer → sink
//! ```
//!
//! Reader threads own their stream exclusively and never touch shared state;
//! all merge state and liveness mutation happens on the owner thread inside
//! [`Session::drain_events`]. The host drives cadence by calling drain each
//! frame; the [`WakeupSignal`](replpad_input::WakeupSignal) lets readers
//! request an early wake when output arrives.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use replpad_input::NullWakeup;
//! use replpad_session::Session;
//!
//! let mut session =
//!     Session::spawn("python3", &["-i".to_string()], Path::new("."), Arc::new(NullWakeup))
//!         .unwrap();
//!
//! // Each frame:
//! session.drain_events(&mut |stream, text| {
//!     // append `text` to the active output cell...
//!     let _ = (stream, text);
//! });
//!
//! // On submit:
//! session.write_line("1 + 1").unwrap();
//! ```

mod error;
mod event;
mod merge;
mod process;
mod session;

pub use error::SessionError;
pub use event::{SessionEvent, StreamKind};
pub use merge::{NewlineCoalescer, Utf8Chunker};
pub use session::{collapse_submission, Session};
