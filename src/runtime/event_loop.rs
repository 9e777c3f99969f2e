use std::sync::mpsc::{Receiver, Sender};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Mode};
use crate::audio::{Ambience, AudioPlayer};
use crate::config;
use crate::session::{Tick, TickHandle, TickOutcome, spawn_ticker};
use crate::storage::KeyValueStore;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Ticker of the running meditation session, if any.
    pub ticker: Option<TickHandle>,
    pub(super) tick_tx: Sender<Tick>,
    pub(super) tick_rx: Receiver<Tick>,
}

impl EventLoopState {
    pub fn new(tick_tx: Sender<Tick>, tick_rx: Receiver<Tick>) -> Self {
        Self {
            ticker: None,
            tick_tx,
            tick_rx,
        }
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            tracing::debug!(serial = handle.serial(), "cancelling ticker");
            handle.cancel();
        }
    }
}

/// Main terminal event loop: feeds session ticks, draws the UI and handles
/// input. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<impl KeyValueStore>,
    audio_player: &AudioPlayer,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let playback = audio_player.playback_handle();

    loop {
        drain_ticks(app, audio_player, state);

        let info = playback.lock().ok().map(|i| i.clone());
        terminal.draw(|f| ui::draw(f, app, info.as_ref(), &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, audio_player, state) {
                    break;
                }
            }
        }
    }

    state.stop_ticker();
    audio_player.quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    Ok(())
}

/// Apply every pending tick; the ticker is cancelled once its session ends.
pub(super) fn drain_ticks(
    app: &mut App<impl KeyValueStore>,
    ambience: &dyn Ambience,
    state: &mut EventLoopState,
) {
    while let Ok(tick) = state.tick_rx.try_recv() {
        if app.on_tick(tick, ambience) == TickOutcome::Completed {
            state.stop_ticker();
        }
    }
}

/// Dispatch one key press according to the current mode. Returns `true`
/// when the user asked to quit.
pub(super) fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App<impl KeyValueStore>,
    ambience: &dyn Ambience,
    state: &mut EventLoopState,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    // The notice swallows the key that dismisses it.
    if app.notice.is_some() {
        app.dismiss_notice();
        return false;
    }

    match app.mode {
        Mode::ConfirmDelete { .. } => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.answer_delete(true);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.answer_delete(false);
            }
            _ => {}
        },
        Mode::EditGoal => match key.code {
            KeyCode::Esc => app.cancel_edit(),
            KeyCode::Enter => {
                app.submit_goal();
            }
            KeyCode::Backspace => app.pop_goal_char(),
            KeyCode::Char(c) if !c.is_control() && !key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.push_goal_char(c);
            }
            _ => {}
        },
        Mode::Browse => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Enter => app.begin_edit(),
            KeyCode::Char('l') | KeyCode::Right => app.next(),
            KeyCode::Char('h') | KeyCode::Left => app.prev(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            KeyCode::Char('r') => {
                app.reset_selected();
            }
            KeyCode::Char('d') => app.request_delete_selected(),
            KeyCode::Char('p') => app.pledge_selected(),
            KeyCode::Char('m') => {
                if let Some(serial) = app.start_meditation(ambience) {
                    state.stop_ticker();
                    let period = Duration::from_millis(settings.meditation.tick_ms);
                    state.ticker = Some(spawn_ticker(period, serial, state.tick_tx.clone()));
                }
            }
            _ => {}
        },
    }

    false
}
