use super::store::decode;
use super::*;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn store_at(now: DateTime<Utc>) -> (TrackerStore<MemoryStore>, FixedClock) {
    let clock = FixedClock::at(now);
    (TrackerStore::load(MemoryStore::new(), clock.clone()), clock)
}

#[test]
fn add_trims_goal_and_appends() {
    let (mut store, _clock) = store_at(t0());
    let id = store.add("  Smoking \n").unwrap().unwrap();

    assert_eq!(store.len(), 1);
    let t = store.get(id).unwrap();
    assert_eq!(t.goal, "Smoking");
    assert_eq!(t.start_date, t0());
    assert_eq!(store.storage().writes(), 1);
}

#[test]
fn add_rejects_blank_goals_without_writing() {
    let (mut store, _clock) = store_at(t0());
    assert_eq!(store.add("").unwrap(), None);
    assert_eq!(store.add("   ").unwrap(), None);
    assert_eq!(store.add("\t\n").unwrap(), None);

    assert!(store.is_empty());
    assert_eq!(store.storage().writes(), 0);
    assert_eq!(store.storage().raw(TRACKERS_KEY), None);
}

#[test]
fn ids_are_creation_millis_and_stay_unique_under_a_frozen_clock() {
    let (mut store, _clock) = store_at(t0());
    let a = store.add("Sugar").unwrap().unwrap();
    let b = store.add("Coffee").unwrap().unwrap();
    let c = store.add("Doomscrolling").unwrap().unwrap();

    assert_eq!(a, t0().timestamp_millis());
    assert_eq!(b, a + 1);
    assert_eq!(c, a + 2);
}

#[test]
fn ids_stay_unique_when_the_clock_goes_backwards() {
    let (mut store, clock) = store_at(t0());
    let a = store.add("Sugar").unwrap().unwrap();
    clock.set(t0() - Duration::hours(1));
    let b = store.add("Coffee").unwrap().unwrap();
    assert!(b > a);
}

#[test]
fn insertion_order_is_kept() {
    let (mut store, clock) = store_at(t0());
    for goal in ["c", "a", "b"] {
        store.add(goal).unwrap();
        clock.advance(Duration::seconds(1));
    }
    let goals: Vec<&str> = store.trackers().iter().map(|t| t.goal.as_str()).collect();
    assert_eq!(goals, vec!["c", "a", "b"]);
}

#[test]
fn reset_only_touches_the_target_start_date() {
    let (mut store, clock) = store_at(t0());
    let a = store.add("Smoking").unwrap().unwrap();
    let b = store.add("Sugar").unwrap().unwrap();
    let before_b = store.get(b).unwrap().clone();

    let later = t0() + Duration::days(3);
    clock.set(later);
    assert!(store.reset(a).unwrap());

    let ta = store.get(a).unwrap();
    assert_eq!(ta.id, a);
    assert_eq!(ta.goal, "Smoking");
    assert_eq!(ta.start_date, later);
    assert_eq!(store.get(b).unwrap(), &before_b);
    assert_eq!(store.storage().writes(), 3);
}

#[test]
fn reset_unknown_id_is_a_noop() {
    let (mut store, _clock) = store_at(t0());
    store.add("Smoking").unwrap();
    assert!(!store.reset(42).unwrap());
    assert_eq!(store.storage().writes(), 1);
}

#[test]
fn declined_delete_leaves_persisted_bytes_identical() {
    let (mut store, _clock) = store_at(t0());
    let a = store.add("Smoking").unwrap().unwrap();
    store.add("Sugar").unwrap();
    let before = store.storage().raw(TRACKERS_KEY).unwrap().to_string();
    let before_trackers = store.trackers().to_vec();

    let mut asked = None;
    let deleted = store
        .delete(a, |t| {
            asked = Some(delete_prompt(&t.goal));
            false
        })
        .unwrap();

    assert!(!deleted);
    assert_eq!(
        asked.as_deref(),
        Some("Are you sure you want to delete the tracker: \"Smoking\"?")
    );
    assert_eq!(store.trackers(), before_trackers.as_slice());
    assert_eq!(store.storage().raw(TRACKERS_KEY).unwrap(), before);
    assert_eq!(store.storage().writes(), 2);
}

#[test]
fn confirmed_delete_removes_exactly_the_target() {
    let (mut store, clock) = store_at(t0());
    let a = store.add("a").unwrap().unwrap();
    clock.advance(Duration::seconds(1));
    let b = store.add("b").unwrap().unwrap();
    clock.advance(Duration::seconds(1));
    let c = store.add("c").unwrap().unwrap();

    assert!(store.delete(b, |_| true).unwrap());

    let ids: Vec<TrackerId> = store.trackers().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![a, c]);

    let reloaded = TrackerStore::load(store.storage().clone(), clock.clone());
    assert_eq!(reloaded.trackers(), store.trackers());
}

#[test]
fn delete_unknown_id_never_prompts() {
    let (mut store, _clock) = store_at(t0());
    store.add("a").unwrap();
    let deleted = store
        .delete(999, |_| panic!("prompt must not be shown"))
        .unwrap();
    assert!(!deleted);
}

#[test]
fn round_trip_through_storage_preserves_collection() {
    let (mut store, clock) = store_at(t0());
    store.add("Smoking").unwrap();
    clock.advance(Duration::milliseconds(1_234));
    store.add("Sugar").unwrap();
    clock.advance(Duration::days(2));
    store.add("Late nights").unwrap();

    let reloaded = TrackerStore::load(store.storage().clone(), clock.clone());
    assert_eq!(reloaded.trackers(), store.trackers());
}

#[test]
fn persisted_format_matches_browser_layout() {
    let (mut store, _clock) = store_at(t0());
    store.add("Smoking").unwrap();

    let raw = store.storage().raw(TRACKERS_KEY).unwrap();
    let expected = format!(
        r#"[{{"id":{},"goal":"Smoking","startDate":"2024-05-01T12:00:00.000Z"}}]"#,
        t0().timestamp_millis()
    );
    assert_eq!(raw, expected);
}

#[test]
fn load_accepts_data_written_by_the_web_version() {
    let raw = r#"[
        {"id": 1714564800000, "goal": "Smoking", "startDate": "2024-05-01T12:00:00.000Z"},
        {"id": 1714564900000, "goal": "Sugar", "startDate": "2024-05-01T12:01:40.500Z"}
    ]"#;
    let storage = MemoryStore::new().with_value(TRACKERS_KEY, raw);
    let store = TrackerStore::load(storage, FixedClock::at(t0()));

    assert_eq!(store.len(), 2);
    assert_eq!(store.trackers()[1].goal, "Sugar");
    assert_eq!(
        store.trackers()[1].start_date,
        t0() + Duration::milliseconds(100_500)
    );
}

#[test]
fn load_fails_soft_on_malformed_data() {
    for raw in ["", "not json", "{\"id\":1}", "[1,2", "null"] {
        let storage = MemoryStore::new().with_value(TRACKERS_KEY, raw);
        let store = TrackerStore::load(storage, FixedClock::at(t0()));
        assert!(store.is_empty(), "expected empty store for {raw:?}");
    }
}

#[test]
fn load_drops_invalid_records_and_keeps_the_rest() {
    let raw = r#"[
        {"id": 1, "goal": "ok", "startDate": "2024-05-01T12:00:00.000Z"},
        {"id": 2, "goal": "   ", "startDate": "2024-05-01T12:00:00.000Z"},
        {"id": 1, "goal": "dupe", "startDate": "2024-05-01T12:00:00.000Z"},
        {"id": 3, "goal": "bad date", "startDate": "yesterday"},
        {"id": 4, "goal": "also ok", "startDate": "2024-05-01T12:00:00Z"}
    ]"#;
    let ids: Vec<TrackerId> = decode(raw).iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> Result<Option<String>, crate::storage::StorageError> {
        Err(crate::storage::StorageError::Read {
            path: "/nonexistent/trackers.json".into(),
            source: std::io::Error::other("boom"),
        })
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), crate::storage::StorageError> {
        Err(crate::storage::StorageError::Write {
            path: "/nonexistent/trackers.json".into(),
            source: std::io::Error::other("boom"),
        })
    }
}

#[test]
fn unreadable_storage_starts_empty_and_write_errors_keep_the_change() {
    let mut store = TrackerStore::load(FailingStore, FixedClock::at(t0()));
    assert!(store.is_empty());

    assert!(store.add("Smoking").is_err());
    assert_eq!(store.len(), 1);
}

#[test]
fn elapsed_description_splits_days_hours_minutes_seconds() {
    let (mut store, _clock) = store_at(t0());
    let id = store.add("Smoking").unwrap().unwrap();

    let now = t0() + Duration::seconds(90_061);
    let e = store.elapsed_description(id, now).unwrap();
    assert_eq!(
        e,
        Elapsed {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 1
        }
    );
    assert_eq!(e.to_string(), "1d 1h 1m 1s");
    assert_eq!(e.days_text(), "1d");
    assert_eq!(e.clock_text(), "1h 1m 1s");
}

#[test]
fn elapsed_description_unknown_id_is_none() {
    let (store, _clock) = store_at(t0());
    assert_eq!(store.elapsed_description(7, t0()), None);
}

#[test]
fn elapsed_ignores_sub_second_remainders() {
    let e = Elapsed::from_millis(59_999);
    assert_eq!(e.seconds, 59);
    assert_eq!(e.minutes, 0);

    let e = Elapsed::from_millis(86_400_000 * 10 + 3_599_999);
    assert_eq!((e.days, e.hours, e.minutes, e.seconds), (10, 0, 59, 59));
}

#[test]
fn future_start_clamps_to_zero() {
    let e = Elapsed::between(t0() + Duration::minutes(5), t0());
    assert_eq!(e, Elapsed::default());
    assert_eq!(e.to_string(), "0d 0h 0m 0s");
}

#[test]
fn trackers_survive_a_restart_over_file_storage() {
    let dir = tempfile::tempdir().unwrap();
    let clock = FixedClock::at(t0());

    let mut store = TrackerStore::load(FileStore::open(dir.path()).unwrap(), clock.clone());
    let smoking = store.add("Smoking").unwrap().unwrap();
    clock.advance(Duration::seconds(1));
    let sugar = store.add("Sugar").unwrap().unwrap();
    clock.advance(Duration::hours(2));
    assert!(store.reset(sugar).unwrap());
    let saved = store.trackers().to_vec();
    drop(store);

    let entries: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(entries, vec!["trackers.json".to_string()]);

    let reopened = TrackerStore::load(FileStore::open(dir.path()).unwrap(), clock);
    assert_eq!(reopened.trackers(), saved.as_slice());
    assert_eq!(reopened.get(smoking).unwrap().start_date, t0());
    assert_eq!(
        reopened.get(sugar).unwrap().start_date,
        t0() + Duration::seconds(1) + Duration::hours(2)
    );
}
