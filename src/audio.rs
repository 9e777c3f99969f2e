//! Ambient sound for meditation sessions.
//!
//! A dedicated thread owns the `rodio` output stream and loops a single sound
//! file on request. The rest of the app talks to it through `AudioCmd`
//! messages via `AudioPlayer`, or through the `Ambience` trait so tests can
//! substitute a fake.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::{Ambience, AudioError, PlaybackInfo};

#[cfg(test)]
mod tests;
