// Chunk: docs/chunks/process_session - Child process session and stream readers
//! Child process spawning and reader thread management.
//!
//! This module spawns the child with stdin, stdout, and stderr all piped -
//! stderr stays independent of stdout so the two streams can be read (and
//! fail) separately - and starts one blocking reader thread per output
//! stream. Each reader owns its stream exclusively, pushes chunks onto a
//! shared crossbeam channel, and signals the host's wakeup so output is
//! drained promptly rather than on the next timer tick.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use replpad_input::WakeupSignal;
use tracing::{debug, warn};

use crate::event::{SessionEvent, StreamKind};

/// Handle to a child process and its two reader threads.
#[derive(Debug)]
pub struct ChildHandle {
    /// The child process. Kept to query exit status and to kill on drop.
    child: Child,
    /// Writer for the child's stdin, taken from the child once at spawn.
    stdin: ChildStdin,
    /// Receiver for events from both reader threads.
    event_rx: Receiver<SessionEvent>,
    /// Reader thread handles (detached on drop, see `Drop` below).
    reader_threads: [Option<JoinHandle<()>>; 2],
}

impl ChildHandle {
    /// Spawns `program` with `args` in `cwd`, wiring up both reader threads.
    ///
    /// `wakeup` is signaled whenever a reader pushes an event, so the host
    /// can drain and redraw promptly.
    pub fn spawn(
        program: &str,
        args: &[String],
        cwd: &Path,
        wakeup: Arc<dyn WakeupSignal>,
    ) -> io::Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // All three pipes were requested above; a missing one means the
        // platform gave us a broken child, so surface it as an error.
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("child stdin was not piped"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not piped"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not piped"))?;

        debug!(program, pid = child.id(), "spawned session child");

        let (event_tx, event_rx) = unbounded();
        let stdout_thread = spawn_reader(stdout, StreamKind::Stdout, event_tx.clone(), Arc::clone(&wakeup));
        let stderr_thread = spawn_reader(stderr, StreamKind::Stderr, event_tx, wakeup);

        Ok(ChildHandle {
            child,
            stdin,
            event_rx,
            reader_threads: [Some(stdout_thread), Some(stderr_thread)],
        })
    }

    /// Writes data to the child's stdin and flushes it.
    pub fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.stdin.write_all(data)?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Tries to receive one reader event without blocking.
    pub fn try_recv(&self) -> Option<SessionEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Checks if the child process has exited.
    ///
    /// Returns `Some(exit_code)` if the process has exited, `None` otherwise.
    pub fn try_wait(&mut self) -> Option<i32> {
        match self.child.try_wait() {
            Ok(Some(status)) => Some(status.code().unwrap_or(-1)),
            Ok(None) => None,
            Err(_) => Some(-1), // Error checking status, assume dead
        }
    }

    /// Waits briefly for the exit status.
    ///
    /// Used once, when both streams have closed: the process is exiting, but
    /// the pipe EOFs can be observed a moment before the child is reapable.
    pub fn wait_timeout(&mut self, timeout: std::time::Duration) -> Option<i32> {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            if let Some(code) = self.try_wait() {
                return Some(code);
            }
            if std::time::Instant::now() >= deadline {
                return None;
            }
            thread::sleep(std::time::Duration::from_millis(1));
        }
    }

    /// Returns the child's process id.
    pub fn process_id(&self) -> u32 {
        self.child.id()
    }

    /// Requests graceful termination.
    ///
    /// Sends SIGTERM so the child can clean up; callers escalate to `kill`
    /// (or rely on drop) if it lingers. Idempotent - signaling an already
    /// dead process is a no-op.
    pub fn terminate(&mut self) {
        #[cfg(unix)]
        {
            let pid = self.child.id() as libc::pid_t;
            let result = unsafe { libc::kill(pid, libc::SIGTERM) };
            if result != 0 {
                let err = io::Error::last_os_error();
                // ESRCH: already gone. Anything else is worth a log line.
                if err.raw_os_error() != Some(libc::ESRCH) {
                    warn!(pid, %err, "SIGTERM failed");
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = self.child.kill();
        }
    }

}

impl Drop for ChildHandle {
    fn drop(&mut self) {
        // Kill the process if it's still running to ensure the reader threads
        // will hit EOF or an error and exit.
        let _ = self.child.kill();
        let _ = self.child.try_wait();

        // The reader threads exit when their stream closes. We don't join
        // them: a reader blocked in read() may not unblock immediately on
        // every platform, and the owner must not stall. The threads are
        // detached and cleaned up by the OS.
        for handle in &mut self.reader_threads {
            handle.take();
        }
    }
}

/// Spawns the blocking reader loop for one stream.
///
/// The loop exits on EOF (`Eof` event), on a read error (`ReadError` event),
/// or when the receiving side has been dropped.
fn spawn_reader<R: Read + Send + 'static>(
    mut stream: R,
    kind: StreamKind,
    tx: Sender<SessionEvent>,
    wakeup: Arc<dyn WakeupSignal>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => {
                    // EOF - process side closed
                    debug!(stream = kind.label(), "stream closed");
                    let _ = tx.send(SessionEvent::Eof(kind));
                    wakeup.signal();
                    break;
                }
                Ok(n) => {
                    if tx.send(SessionEvent::Output(kind, buf[..n].to_vec())).is_err() {
                        // Channel closed, owner dropped
                        break;
                    }
                    wakeup.signal();
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(stream = kind.label(), %e, "stream read failed; reader stopping");
                    let _ = tx.send(SessionEvent::ReadError(kind, e));
                    wakeup.signal();
                    break;
                }
            }
        }
    })
}
