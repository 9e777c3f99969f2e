use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::storage::{KeyValueStore, StorageError};

use super::clock::Clock;
use super::elapsed::Elapsed;
use super::model::{Tracker, TrackerId};

/// Storage key holding the serialized tracker collection.
pub const TRACKERS_KEY: &str = "trackers";

/// Text of the yes/no prompt shown before a tracker is deleted.
pub fn delete_prompt(goal: &str) -> String {
    format!("Are you sure you want to delete the tracker: \"{goal}\"?")
}

/// Ordered tracker collection backed by a `KeyValueStore`.
///
/// Every successful mutation rewrites the full collection under
/// [`TRACKERS_KEY`]. When a write fails the in-memory change is kept and the
/// error is handed back to the caller.
pub struct TrackerStore<S> {
    storage: S,
    clock: Box<dyn Clock>,
    trackers: Vec<Tracker>,
}

impl<S: KeyValueStore> TrackerStore<S> {
    /// Rehydrate from `storage`. Missing, unreadable or malformed data yields
    /// an empty store.
    pub fn load(storage: S, clock: impl Clock + 'static) -> Self {
        let trackers = match storage.get(TRACKERS_KEY) {
            Ok(Some(raw)) => decode(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read trackers; starting empty");
                Vec::new()
            }
        };
        tracing::info!(count = trackers.len(), "trackers loaded");

        Self {
            storage,
            clock: Box::new(clock),
            trackers,
        }
    }

    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    pub fn get(&self, id: TrackerId) -> Option<&Tracker> {
        self.trackers.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Current instant according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Append a tracker for `goal_text` (trimmed) starting now.
    ///
    /// Blank input is ignored and returns `Ok(None)` without touching storage.
    pub fn add(&mut self, goal_text: &str) -> Result<Option<TrackerId>, StorageError> {
        let goal = goal_text.trim();
        if goal.is_empty() {
            return Ok(None);
        }

        let now = self.clock.now();
        let id = self.next_id(now);
        self.trackers.push(Tracker {
            id,
            goal: goal.to_string(),
            start_date: now,
        });
        tracing::info!(id, goal, "tracker added");

        self.persist()?;
        Ok(Some(id))
    }

    /// Restart the streak of tracker `id`. Returns `Ok(false)` for unknown ids.
    pub fn reset(&mut self, id: TrackerId) -> Result<bool, StorageError> {
        let now = self.clock.now();
        let Some(tracker) = self.trackers.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        tracker.start_date = now;
        tracing::info!(id, "tracker reset");

        self.persist()?;
        Ok(true)
    }

    /// Remove tracker `id` if `confirm` agrees.
    ///
    /// `confirm` is only consulted when the tracker exists. Declining is not
    /// an error: nothing changes and nothing is written.
    pub fn delete(
        &mut self,
        id: TrackerId,
        confirm: impl FnOnce(&Tracker) -> bool,
    ) -> Result<bool, StorageError> {
        let Some(pos) = self.trackers.iter().position(|t| t.id == id) else {
            return Ok(false);
        };
        if !confirm(&self.trackers[pos]) {
            tracing::debug!(id, "tracker deletion declined");
            return Ok(false);
        }

        let removed = self.trackers.remove(pos);
        tracing::info!(id, goal = %removed.goal, "tracker deleted");

        self.persist()?;
        Ok(true)
    }

    /// Time elapsed since tracker `id` started, as of `now`.
    pub fn elapsed_description(&self, id: TrackerId, now: DateTime<Utc>) -> Option<Elapsed> {
        self.get(id).map(|t| Elapsed::between(t.start_date, now))
    }

    fn next_id(&self, now: DateTime<Utc>) -> TrackerId {
        let candidate = now.timestamp_millis();
        match self.trackers.iter().map(|t| t.id).max() {
            Some(max) if candidate <= max => max + 1,
            _ => candidate,
        }
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.trackers).map_err(|source| StorageError::Encode {
            key: TRACKERS_KEY.to_string(),
            source,
        })?;
        self.storage.set(TRACKERS_KEY, &raw)
    }
}

/// Decode the persisted collection.
///
/// Anything other than a JSON array is treated as no data. Individual records
/// that fail to parse, have a blank goal, or repeat an earlier id are dropped.
pub(super) fn decode(raw: &str) -> Vec<Tracker> {
    let records: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(error = %e, "stored trackers are malformed; starting empty");
            return Vec::new();
        }
    };

    let mut seen: HashSet<TrackerId> = HashSet::new();
    let mut trackers = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let tracker: Tracker = match serde_json::from_value(record) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping unreadable tracker record");
                continue;
            }
        };
        if tracker.goal.trim().is_empty() {
            tracing::warn!(index, id = tracker.id, "dropping tracker with blank goal");
            continue;
        }
        if !seen.insert(tracker.id) {
            tracing::warn!(index, id = tracker.id, "dropping tracker with duplicate id");
            continue;
        }
        trackers.push(tracker);
    }
    trackers
}
