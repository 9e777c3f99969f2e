//! Application model types: `App` and `Mode`.
//!
//! `App` turns user intents (add, reset, delete, meditate) into store and
//! session operations and keeps the transient view state the UI renders.

use crate::audio::Ambience;
use crate::config::MeditationSettings;
use crate::session::{SessionTimer, Tick, TickOutcome};
use crate::storage::{KeyValueStore, StorageError};
use crate::tracker::{Elapsed, Tracker, TrackerId, TrackerStore, delete_prompt};

/// Shown when a meditation session runs to completion.
pub const COMPLETION_NOTICE: &str = "Meditation complete. Great job staying focused.";

/// What keyboard input currently means.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Moving between tracker cards and triggering their actions.
    #[default]
    Browse,
    /// Typing a new goal into the input box.
    EditGoal,
    /// Waiting for a yes/no answer before deleting tracker `id`.
    ConfirmDelete { id: TrackerId, prompt: String },
}

/// The main application model.
pub struct App<S> {
    pub store: TrackerStore<S>,
    pub session: SessionTimer,
    pub mode: Mode,
    pub selected: usize,
    pub goal_input: String,
    /// Modal message; any key dismisses it.
    pub notice: Option<String>,
    /// Last persistence problem, shown in the status line.
    pub status: Option<String>,
    volume: f32,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: TrackerStore<S>, meditation: &MeditationSettings) -> Self {
        Self {
            store,
            session: SessionTimer::new(meditation.duration_secs),
            mode: Mode::Browse,
            selected: 0,
            goal_input: String::new(),
            notice: None,
            status: None,
            volume: meditation.volume,
        }
    }

    pub fn trackers(&self) -> &[Tracker] {
        self.store.trackers()
    }

    pub fn selected_tracker(&self) -> Option<&Tracker> {
        self.store.trackers().get(self.selected)
    }

    /// Elapsed streak of `id` as of now.
    pub fn elapsed(&self, id: TrackerId) -> Option<Elapsed> {
        self.store.elapsed_description(id, self.store.now())
    }

    /// Label of the meditate control; the control is inert while running.
    pub fn meditate_label(&self) -> &'static str {
        if self.session.is_active() {
            "Meditating..."
        } else {
            "Meditate"
        }
    }

    // ── Selection ────────────────────────────────────────────────────

    /// Move selection to the next card, wrapping around.
    pub fn next(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move selection to the previous card, wrapping around.
    pub fn prev(&mut self) {
        let len = self.store.len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.store.len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.store.len() {
            self.select_last();
        }
    }

    // ── Goal input ───────────────────────────────────────────────────

    pub fn begin_edit(&mut self) {
        self.mode = Mode::EditGoal;
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Browse;
    }

    pub fn push_goal_char(&mut self, c: char) {
        self.goal_input.push(c);
    }

    pub fn pop_goal_char(&mut self) {
        self.goal_input.pop();
    }

    /// Add a tracker from the input box.
    ///
    /// Blank input is ignored and left in place. On success the input is
    /// cleared, the new card is selected and browsing resumes.
    pub fn submit_goal(&mut self) -> bool {
        let result = self.store.add(&self.goal_input);
        let added = match result {
            Ok(id) => id,
            Err(e) => {
                // The tracker is kept in memory even though the write failed.
                self.report_storage_error(&e);
                self.store.trackers().last().map(|t| t.id)
            }
        };
        if added.is_none() {
            return false;
        }

        self.goal_input.clear();
        self.select_last();
        self.mode = Mode::Browse;
        true
    }

    // ── Tracker actions ──────────────────────────────────────────────

    pub fn reset_selected(&mut self) -> bool {
        let Some(id) = self.selected_tracker().map(|t| t.id) else {
            return false;
        };
        match self.store.reset(id) {
            Ok(changed) => changed,
            Err(e) => {
                self.report_storage_error(&e);
                true
            }
        }
    }

    /// Ask for confirmation before deleting the selected tracker.
    pub fn request_delete_selected(&mut self) {
        let Some((id, prompt)) = self
            .selected_tracker()
            .map(|t| (t.id, delete_prompt(&t.goal)))
        else {
            return;
        };
        self.mode = Mode::ConfirmDelete { id, prompt };
    }

    /// Resolve a pending delete prompt. Returns whether a tracker was removed.
    pub fn answer_delete(&mut self, yes: bool) -> bool {
        let Mode::ConfirmDelete { id, .. } = std::mem::take(&mut self.mode) else {
            return false;
        };
        let removed = match self.store.delete(id, |_| yes) {
            Ok(removed) => removed,
            Err(e) => {
                self.report_storage_error(&e);
                true
            }
        };
        self.clamp_selection();
        removed
    }

    /// Placeholder control without behaviour.
    pub fn pledge_selected(&self) {
        if let Some(t) = self.selected_tracker() {
            tracing::debug!(id = t.id, "pledge pressed; no action defined");
        }
    }

    // ── Meditation ───────────────────────────────────────────────────

    /// Start a session and its ambience. Returns the session serial when a
    /// new session began, `None` when one is already running.
    pub fn start_meditation(&mut self, ambience: &dyn Ambience) -> Option<u64> {
        if !self.session.start() {
            return None;
        }
        let serial = self.session.serial();
        tracing::info!(serial, secs = self.session.remaining_secs(), "meditation started");

        if let Err(e) = ambience.start_loop(self.volume) {
            tracing::warn!(error = %e, "could not start ambience; meditating without sound");
        }
        Some(serial)
    }

    /// Feed one tick to the session. Ticks from an earlier session are
    /// ignored.
    pub fn on_tick(&mut self, tick: Tick, ambience: &dyn Ambience) -> TickOutcome {
        if tick.serial != self.session.serial() {
            tracing::trace!(tick = tick.serial, current = self.session.serial(), "stale tick");
            return TickOutcome::Idle;
        }

        let outcome = self.session.tick();
        if outcome == TickOutcome::Completed {
            ambience.stop();
            self.notice = Some(COMPLETION_NOTICE.to_string());
            tracing::info!(serial = tick.serial, "meditation complete");
        }
        outcome
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn report_storage_error(&mut self, e: &StorageError) {
        tracing::error!(error = %e, "failed to save trackers");
        self.status = Some(format!("Could not save trackers: {e}"));
    }
}
