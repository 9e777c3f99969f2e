//! Audio-related small types and handles.
//!
//! Commands understood by the audio thread, its error type, the shared
//! playback snapshot read by the UI, and the `Ambience` seam.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use thiserror::Error;

#[derive(Debug)]
pub enum AudioCmd {
    /// Loop the configured sound from the start at `volume` until stopped.
    PlayLoop { volume: f32 },
    /// Stop playback, fading out over `fade_out_ms` milliseconds.
    Stop { fade_out_ms: u64 },
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("audio thread is not running")]
    Disconnected,
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Whether the ambience is currently audible.
    pub playing: bool,
    /// Most recent playback failure, cleared by the next successful start.
    pub last_error: Option<String>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// Looping background sound used during a meditation session.
pub trait Ambience {
    /// Begin looping the ambience at `volume`.
    fn start_loop(&self, volume: f32) -> Result<(), AudioError>;

    /// Stop the ambience if it is playing.
    fn stop(&self);
}
