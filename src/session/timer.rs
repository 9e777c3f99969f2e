//! Countdown state machine.
//!
//! ```text
//! Idle --start()--> Running --tick() at <= 1s--> Idle (Completed)
//! ```
//!
//! The timer holds no thread of its own; the runtime feeds it ticks.

/// Whether a session is counting down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Running,
}

/// Result of feeding one tick to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer was idle; nothing happened.
    Idle,
    /// One second elapsed; this many remain.
    Counting(u32),
    /// The session just finished. Reported once per session.
    Completed,
}

#[derive(Debug, Clone)]
pub struct SessionTimer {
    duration_secs: u32,
    remaining_secs: u32,
    state: SessionState,
    serial: u64,
}

impl SessionTimer {
    /// Create an idle timer whose sessions last `duration_secs`.
    pub fn new(duration_secs: u32) -> Self {
        Self {
            duration_secs,
            remaining_secs: duration_secs,
            state: SessionState::Idle,
            serial: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    /// Identifier of the current (or most recent) session. Increments on
    /// every successful `start`.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Begin a session. Inert while one is already running; returns whether
    /// a new session started.
    pub fn start(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.state = SessionState::Running;
        self.remaining_secs = self.duration_secs;
        self.serial += 1;
        true
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active() {
            return TickOutcome::Idle;
        }
        if self.remaining_secs <= 1 {
            self.remaining_secs = 0;
            self.state = SessionState::Idle;
            return TickOutcome::Completed;
        }
        self.remaining_secs -= 1;
        TickOutcome::Counting(self.remaining_secs)
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_mmss(self.remaining_secs)
    }
}

/// Format whole seconds as zero-padded `MM:SS`.
pub fn format_mmss(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
