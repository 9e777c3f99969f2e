//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the tracker store, the
//! meditation session and the view state of the single page.

mod model;

pub use model::*;
