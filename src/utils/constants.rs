//! Shared configuration constants for remote search
//!
//! Default values used by the configuration builder and the HTTP fetcher,
//! kept in one place to avoid magic numbers across the crate.

use std::time::Duration;

/// Default minimum number of characters before a search fires
pub const DEFAULT_MIN_LEN: usize = 3;

/// Default query-string parameter that carries the user's text
pub const DEFAULT_SEARCH_QUERY_PARAM: &str = "search_term";

/// Default input placeholder
pub const DEFAULT_PLACEHOLDER: &str = "search...";

/// Default item key used to derive a row label
pub const DEFAULT_LABEL_KEY: &str = "name";

/// Default wrapper key holding the item array in object responses
pub const DEFAULT_ITEMS_KEY: &str = "items";

/// Quiet period after the last keystroke before the typed value is settled
///
/// Short enough to feel live, long enough that a fast typist does not
/// produce one request per character.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(500);

/// Timeout for a single search request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Horizontal inset of the anchored spinner from the input's right edge (px)
pub const SPINNER_RIGHT_INSET: f64 = 30.0;

/// The anchored spinner sits this fraction (1/n) of the input height below its top
pub const SPINNER_TOP_DIVISOR: f64 = 5.0;

/// CSS class wrapped around matched text in highlighted labels
pub const HIGHLIGHT_CLASS: &str = "remote-search-highlight-match";

/// Capacity of the per-widget event channel
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// User agent sent with search requests
pub const USER_AGENT: &str = concat!("remote_search/", env!("CARGO_PKG_VERSION"));
