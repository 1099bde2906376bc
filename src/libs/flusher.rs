//! Background flush worker.
//!
//! Spawns a thread that flushes the board on a fixed interval until the
//! handle is stopped or dropped, so edits made during a long interactive
//! session reach disk before the session ends. The worker always runs one
//! final flush on shutdown.

use crate::board::Board;
use crate::libs::messages::Message;
use crate::{msg_debug, msg_warning};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

/// Handle to the background flush thread. Dropping it stops the worker and
/// waits for its final flush.
pub struct Flusher {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Flusher {
    /// Spawns the worker, flushing `board` every `interval`.
    pub fn spawn(board: Arc<Board>, interval: Duration) -> Flusher {
        let (stop, ticks) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || {
            msg_debug!(Message::FlusherStarted(interval.as_secs()));
            loop {
                match ticks.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        let report = board.flush();
                        if report.saved > 0 || report.removed > 0 {
                            msg_debug!(Message::FlushCompleted(report.saved, report.removed));
                        }
                        if report.failed > 0 {
                            msg_warning!(Message::FlushFailures(report.failed));
                        }
                    }
                    // Stop signal or a dropped sender both end the loop
                    _ => break,
                }
            }
            let report = board.flush();
            if report.failed > 0 {
                msg_warning!(Message::FlushFailures(report.failed));
            }
            msg_debug!(Message::FlusherStopped);
        });
        Flusher {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stops the worker and waits for its final flush to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Flusher {
    fn drop(&mut self) {
        self.shutdown();
    }
}
