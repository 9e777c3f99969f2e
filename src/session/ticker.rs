//! Recurring tick source for the session timer.
//!
//! `spawn_ticker` starts a thread that sends a `Tick` every `period` until the
//! returned `TickHandle` is cancelled or dropped. Ticks are scheduled against
//! fixed deadlines so they do not drift with channel latency.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// One period elapsed for session `serial`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub serial: u64,
}

/// Owner of a running ticker thread.
///
/// `cancel` consumes the handle, so a ticker can only be cancelled once.
/// Dropping the handle cancels it too, which covers teardown.
#[derive(Debug)]
pub struct TickHandle {
    serial: u64,
    stop: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl TickHandle {
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Stop the ticker and wait for its thread to exit. No tick is sent after
    /// this returns.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender wakes the thread immediately.
        let Some(stop) = self.stop.take() else {
            return;
        };
        drop(stop);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        tracing::debug!(serial = self.serial, "ticker cancelled");
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Start sending `Tick { serial }` on `ticks` every `period`.
pub fn spawn_ticker(period: Duration, serial: u64, ticks: Sender<Tick>) -> TickHandle {
    let (stop_tx, stop_rx) = mpsc::channel::<()>();
    let join = thread::spawn(move || run_ticker(period, serial, &stop_rx, &ticks));
    tracing::debug!(serial, period_ms = period.as_millis() as u64, "ticker started");

    TickHandle {
        serial,
        stop: Some(stop_tx),
        join: Some(join),
    }
}

fn run_ticker(period: Duration, serial: u64, stop: &Receiver<()>, ticks: &Sender<Tick>) {
    let mut deadline = Instant::now() + period;
    loop {
        let wait = deadline.saturating_duration_since(Instant::now());
        match stop.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                if ticks.send(Tick { serial }).is_err() {
                    // Receiver is gone; nobody is listening any more.
                    break;
                }
                deadline += period;
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
