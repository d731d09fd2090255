//! The remote search widget: debounce, fetch, render
//!
//! [`RemoteSearch`] turns raw keystrokes into at most one request per pause
//! in typing and keeps the spinner, list border and rows consistent with the
//! cycle's state. Each request carries a sequence token; a response whose
//! token is no longer the latest is discarded instead of rendered.

pub mod controller;
pub mod errors;
pub mod events;
pub mod state;

pub use controller::{RemoteSearch, SearchOutcome};
pub use errors::{RemoteSearchError, RemoteSearchResult};
pub use events::SearchEvent;
pub use state::{SearchPhase, SearchState};
