use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::AudioSettings;

use super::thread::spawn_audio_thread;
use super::types::{Ambience, AudioCmd, AudioError, PlaybackHandle, PlaybackInfo};

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    settings: AudioSettings,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(sound_path: PathBuf, audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(sound_path, rx, playback_info.clone());

        Self {
            tx,
            playback: playback_info,
            settings: audio_settings,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Ambience for AudioPlayer {
    fn start_loop(&self, volume: f32) -> Result<(), AudioError> {
        self.send(AudioCmd::PlayLoop { volume })
            .map_err(|_| AudioError::Disconnected)
    }

    fn stop(&self) {
        let cmd = AudioCmd::Stop {
            fade_out_ms: self.settings.fade_out_ms,
        };
        if self.send(cmd).is_err() {
            tracing::debug!("audio thread gone; nothing to stop");
        }
    }
}
