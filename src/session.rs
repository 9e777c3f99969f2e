//! Guided meditation session: the countdown state machine and the
//! once-per-second tick source that drives it.

mod ticker;
mod timer;

pub use ticker::{Tick, TickHandle, spawn_ticker};
pub use timer::{SessionState, SessionTimer, TickOutcome, format_mmss};

#[cfg(test)]
mod tests;
