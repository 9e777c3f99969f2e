use std::io;

use crate::app::App;
use crate::config;
use crate::logging;
use crate::storage::{FileStore, KeyValueStore, StorageError, UnavailableStore};
use crate::tracker::{Clock, TrackerStore};

/// Start file logging; a failure is reported on stderr and the app runs on.
pub fn start_logging(settings: &config::Settings) {
    let file = settings.log_file();
    if let Err(msg) = logging::init_logging(&file, &settings.logging) {
        eprintln!("quittr: logging disabled: {msg}");
    }
}

/// Open the data directory and load the saved trackers from it.
///
/// An unusable directory is not fatal: the store starts empty over an
/// `UnavailableStore` and the reason is returned for the status line.
pub fn open_tracker_store(
    settings: &config::Settings,
    clock: impl Clock + 'static,
) -> (TrackerStore<Box<dyn KeyValueStore>>, Option<String>) {
    let dir = settings.data_dir();
    match FileStore::open(&dir) {
        Ok(storage) => {
            tracing::info!(dir = ?storage.dir(), "data directory opened");
            (TrackerStore::load(Box::new(storage), clock), None)
        }
        Err(e) => {
            tracing::warn!(error = %e, "data directory unavailable; trackers will not be saved");
            let problem = format!("Trackers will not be saved: {e}");
            let storage = match e {
                StorageError::Write { path, source } | StorageError::Read { path, source } => {
                    UnavailableStore::new(path, &source)
                }
                other => UnavailableStore::new(&dir, &io::Error::other(other.to_string())),
            };
            (TrackerStore::load(Box::new(storage), clock), Some(problem))
        }
    }
}

/// Build the app model over the configured data directory.
pub fn build_app(
    settings: &config::Settings,
    clock: impl Clock + 'static,
) -> App<Box<dyn KeyValueStore>> {
    let (store, problem) = open_tracker_store(settings, clock);
    let mut app = App::new(store, &settings.meditation);
    app.status = problem;
    app
}
