// Chunk: docs/chunks/process_session - Child process session and stream readers

//! Integration tests for the session crate.
//!
//! These tests verify the session against real child processes: output
//! round-trips, stream independence, liveness transitions, and the
//! write-after-close contract.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use replpad_input::NullWakeup;
use replpad_session::{Session, SessionError, StreamKind};

/// Drains the session until `done` says stop or the timeout elapses,
/// collecting committed text per stream.
fn pump<F>(session: &mut Session, timeout: Duration, mut done: F) -> (String, String)
where
    F: FnMut(&Session, &str, &str) -> bool,
{
    let deadline = Instant::now() + timeout;
    let mut out = String::new();
    let mut err = String::new();
    loop {
        let mut sink = |kind: StreamKind, text: &str| match kind {
            StreamKind::Stdout => out.push_str(text),
            StreamKind::Stderr => err.push_str(text),
        };
        session.drain_events(&mut sink);
        if done(session, &out, &err) || Instant::now() >= deadline {
            return (out, err);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn test_echo_round_trip() {
    let mut session = Session::spawn(
        "sh",
        &["-c".to_string(), "read line; echo \"got: $line\"".to_string()],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn sh");

    session.write_line("hello").expect("write");

    let (out, _) = pump(&mut session, Duration::from_secs(3), |_, out, _| {
        out.contains("got: hello")
    });
    assert!(out.contains("got: hello"), "stdout was: {out:?}");
}

#[test]
fn test_multi_line_submission_collapses() {
    // The child reads exactly one line; a two-line submission must arrive
    // as one space-joined line.
    let mut session = Session::spawn(
        "sh",
        &["-c".to_string(), "read line; echo \"[$line]\"".to_string()],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn sh");

    session.write_line("print(1\n+1)").expect("write");

    let (out, _) = pump(&mut session, Duration::from_secs(3), |_, out, _| {
        out.contains(']')
    });
    assert!(out.contains("[print(1 +1)]"), "stdout was: {out:?}");
}

#[test]
fn test_stdout_and_stderr_reach_their_sinks() {
    let mut session = Session::spawn(
        "sh",
        &[
            "-c".to_string(),
            "echo out-line; echo err-line >&2".to_string(),
        ],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn sh");

    let (out, err) = pump(&mut session, Duration::from_secs(3), |session, _, _| {
        !session.is_alive()
    });

    assert!(out.contains("out-line"), "stdout was: {out:?}");
    assert!(err.contains("err-line"), "stderr was: {err:?}");
    assert!(out.find("err-line").is_none(), "streams must not cross");
}

#[test]
fn test_session_dies_when_both_streams_close() {
    let mut session = Session::spawn(
        "sh",
        &["-c".to_string(), "exit 7".to_string()],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn sh");

    pump(&mut session, Duration::from_secs(3), |session, _, _| {
        !session.is_alive() && session.exit_code().is_some()
    });

    assert!(!session.is_alive());
    assert_eq!(session.exit_code(), Some(7));
}

#[test]
fn test_write_after_close_reports_session_closed() {
    let mut session = Session::spawn(
        "true",
        &[],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn true");

    pump(&mut session, Duration::from_secs(3), |session, _, _| {
        !session.is_alive()
    });

    let result = session.write_line("anything");
    assert!(matches!(result, Err(SessionError::Closed)));
}

#[test]
fn test_spawn_failure_is_surfaced() {
    let result = Session::spawn(
        "definitely-not-a-real-program-xyz",
        &[],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    );
    match result {
        Err(SessionError::Spawn { command, .. }) => {
            assert_eq!(command, "definitely-not-a-real-program-xyz");
        }
        other => panic!("expected Spawn error, got {other:?}"),
    }
}

#[test]
fn test_trailing_newline_held_back_until_more_output() {
    // `printf 'a\n'` commits "a" and holds the newline; a second write
    // producing more output flushes it in front of the new text.
    let mut session = Session::spawn(
        "sh",
        &[
            "-c".to_string(),
            "printf 'a\\n'; read line; printf 'b\\n'".to_string(),
        ],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn sh");

    let (out, _) = pump(&mut session, Duration::from_secs(3), |_, out, _| {
        out.contains('a')
    });
    assert_eq!(out, "a");
    assert_eq!(session.pending_newlines(StreamKind::Stdout), "\n");

    session.write_line("go").expect("write");
    let (out, _) = pump(&mut session, Duration::from_secs(3), |_, out, _| {
        out.contains('b')
    });
    // The held newline flushes in front of the new body.
    assert_eq!(out, "\nb");
}

#[test]
fn test_terminate_is_idempotent_and_ends_session() {
    let mut session = Session::spawn(
        "cat",
        &[],
        Path::new("/tmp"),
        Arc::new(NullWakeup),
    )
    .expect("spawn cat");

    assert!(session.is_alive());
    session.terminate();
    session.terminate(); // second call must be harmless

    pump(&mut session, Duration::from_secs(3), |session, _, _| {
        !session.is_alive()
    });
    assert!(!session.is_alive());
}
