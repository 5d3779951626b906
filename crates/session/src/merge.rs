// Chunk: docs/chunks/newline_coalescing - Trailing-newline hold-back merge
//!
//! The newline-coalescing merge that turns chunked stream reads into stable
//! visual text.
//!
//! Reads from a pipe arrive at arbitrary byte boundaries. Committing each
//! chunk verbatim would make trailing newlines flicker into view as blank
//! lines that actually belong with content arriving in the very next read
//! (a prompt following `result\n`, say). The coalescer therefore holds back
//! the maximal trailing run of line terminators from each chunk and prepends
//! it to the next committed body, so a newline only becomes visible once
//! real content follows it.
//!
//! Held-back terminators are discarded when a new output cell is opened
//! (trailing blank lines of a finished cell carry no information), and are
//! simply never committed if the stream closes first.
//!
//! Both pieces here are pure and run on the owner thread; reader threads
//! deliver raw bytes only.

// =============================================================================
// Utf8Chunker
// =============================================================================

/// Incremental UTF-8 decoding across chunk boundaries.
///
/// A read can split a multi-byte sequence; the incomplete tail is carried
/// over to the next chunk instead of being replaced with U+FFFD. Genuinely
/// invalid bytes are replaced, one replacement character per invalid unit,
/// matching `String::from_utf8_lossy`.
#[derive(Debug, Default)]
pub struct Utf8Chunker {
    partial: Vec<u8>,
}

impl Utf8Chunker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `bytes`, returning all complete text available so far.
    pub fn feed(&mut self, bytes: &[u8]) -> String {
        self.partial.extend_from_slice(bytes);
        let mut out = String::new();
        let mut rest: &[u8] = &self.partial;

        loop {
            match std::str::from_utf8(rest) {
                Ok(s) => {
                    out.push_str(s);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let valid = err.valid_up_to();
                    // `from_utf8` already validated this prefix.
                    out.push_str(std::str::from_utf8(&rest[..valid]).unwrap_or(""));
                    match err.error_len() {
                        Some(bad) => {
                            out.push('\u{FFFD}');
                            rest = &rest[valid + bad..];
                        }
                        None => {
                            // Incomplete sequence at the end; keep it for the
                            // next chunk.
                            rest = &rest[valid..];
                            break;
                        }
                    }
                }
            }
        }

        self.partial = rest.to_vec();
        out
    }
}

// =============================================================================
// NewlineCoalescer
// =============================================================================

/// Splits each chunk into body and trailing line terminators, holding the
/// terminators back until real content follows.
///
/// One coalescer exists per stream; its pending buffer is the
/// "pending newline buffer" of the session model.
#[derive(Debug, Default)]
pub struct NewlineCoalescer {
    pending: String,
}

/// Returns the index where the maximal trailing run of line terminator
/// characters (`\n`, `\r`) begins.
fn trailing_terminator_start(text: &str) -> usize {
    text.trim_end_matches(['\n', '\r']).len()
}

impl NewlineCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk of decoded text.
    ///
    /// Returns the text to commit to the output cell now, or `None` when the
    /// whole chunk was terminators (accumulated, not yet committed).
    pub fn feed(&mut self, text: &str) -> Option<String> {
        let split = trailing_terminator_start(text);
        let (body, trailing) = text.split_at(split);

        if body.is_empty() {
            self.pending.push_str(trailing);
            return None;
        }

        let mut commit = std::mem::take(&mut self.pending);
        commit.push_str(body);
        self.pending.push_str(trailing);
        Some(commit)
    }

    /// The held-back terminators not yet committed.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Discards the held-back terminators.
    ///
    /// Called when a new output cell is opened: blank lines trailing the
    /// finished cell are intentionally dropped.
    pub fn reset(&mut self) {
        self.pending.clear();
    }
}
