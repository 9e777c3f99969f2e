//! Tracker records and the persisted store that owns them.
//!
//! A tracker is a user-defined goal ("Smoking", "Sugar", ...) with the
//! timestamp its current streak started. `TrackerStore` keeps them in
//! insertion order and writes the whole collection to durable storage after
//! every change.

mod clock;
mod elapsed;
mod model;
mod store;

pub use clock::{Clock, SystemClock};
pub use elapsed::Elapsed;
pub use model::{Tracker, TrackerId};
pub use store::{TRACKERS_KEY, TrackerStore, delete_prompt};

#[cfg(test)]
pub use clock::FixedClock;

#[cfg(test)]
mod tests;
