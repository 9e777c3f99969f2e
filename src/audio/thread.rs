use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::thread;
use std::thread::JoinHandle;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::{create_looping_sink, fade_out_sink};
use super::types::{AudioCmd, AudioError, PlaybackHandle};

pub(super) fn spawn_audio_thread(
    sound_path: PathBuf,
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        // Opened on first use so a machine without an output device can still
        // run the tracker; only meditation sessions go silent.
        let mut stream: Option<OutputStream> = None;
        let mut sink: Option<Sink> = None;

        fn set_playing(playback_info: &PlaybackHandle, playing: bool, error: Option<String>) {
            if let Ok(mut info) = playback_info.lock() {
                info.playing = playing;
                if playing || error.is_some() {
                    info.last_error = error;
                }
            }
        }

        fn open_stream(stream: &mut Option<OutputStream>) -> Result<&OutputStream, AudioError> {
            if stream.is_none() {
                let mut opened = OutputStreamBuilder::open_default_stream()?;
                // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
                // but noisy for a TUI app.
                opened.log_on_drop(false);
                *stream = Some(opened);
            }
            stream.as_ref().ok_or(AudioError::Disconnected)
        }

        fn do_stop(sink: &mut Option<Sink>, fade_out_ms: u64, playback_info: &PlaybackHandle) {
            if let Some(s) = sink.take() {
                fade_out_sink(&s, fade_out_ms);
                s.stop();
            }
            set_playing(playback_info, false, None);
        }

        while let Ok(cmd) = rx.recv() {
            match cmd {
                AudioCmd::PlayLoop { volume } => {
                    if let Some(old) = sink.take() {
                        old.stop();
                    }

                    let started = open_stream(&mut stream)
                        .and_then(|out| create_looping_sink(out, &sound_path, volume));
                    match started {
                        Ok(new_sink) => {
                            new_sink.play();
                            sink = Some(new_sink);
                            set_playing(&playback_info, true, None);
                            tracing::info!(path = ?sound_path, volume, "ambience started");
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "ambience unavailable; continuing silently");
                            set_playing(&playback_info, false, Some(e.to_string()));
                        }
                    }
                }

                AudioCmd::Stop { fade_out_ms } => {
                    do_stop(&mut sink, fade_out_ms, &playback_info);
                    tracing::debug!("ambience stopped");
                }

                AudioCmd::Quit { fade_out_ms } => {
                    do_stop(&mut sink, fade_out_ms, &playback_info);
                    break;
                }
            }
        }
        tracing::debug!("audio thread exiting");
    })
}
