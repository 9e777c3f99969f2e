//! Utilities for creating `rodio` sinks and fading them out.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::AudioError;

/// Number of volume steps used for a fade-out.
const FADE_STEPS: u64 = 20;

/// Create a paused `Sink` that repeats the sound at `path` forever.
pub(super) fn create_looping_sink(
    stream: &OutputStream,
    path: &Path,
    volume: f32,
) -> Result<Sink, AudioError> {
    let file = File::open(path).map_err(|source| AudioError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|source| AudioError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .repeat_infinite();

    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    sink.append(source);
    sink.pause();
    Ok(sink)
}

/// Volumes to step through when fading out from `from` to silence.
pub(super) fn fade_out_levels(from: f32, steps: u64) -> impl Iterator<Item = f32> {
    let steps = steps.max(1);
    (1..=steps).map(move |step| from * (1.0 - step as f32 / steps as f32))
}

/// Fade `sink` to silence over `fade_out_ms`, blocking the audio thread.
pub(super) fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let step_ms = (fade_out_ms / FADE_STEPS).max(1);
    for level in fade_out_levels(sink.volume(), FADE_STEPS) {
        sink.set_volume(level);
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
