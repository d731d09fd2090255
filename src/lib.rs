pub mod config;
pub mod fetch;
pub mod items;
pub mod layout;
pub mod render;
pub mod typing_delay;
pub mod utils;
pub mod widget;

pub use config::{SearchConfig, SearchConfigBuilder, SearchOptions};
pub use fetch::{FetchResponse, Fetcher, HttpFetcher, ResponseMeta};
pub use items::{HighlightedLabel, Highlighter, ItemsExtractor, LabelStrategy, ResultItem};
pub use layout::{InputRect, Placement, Position};
pub use render::{InputBinding, MemoryRenderer, ResultRow, SearchRenderer, TerminalRenderer};
pub use typing_delay::TypingDelayer;
pub use widget::{
    RemoteSearch, RemoteSearchError, RemoteSearchResult, SearchEvent, SearchOutcome, SearchPhase,
    SearchState,
};

/// Mount a widget over HTTP from a JSON options file
///
/// # Errors
///
/// Fails when the file cannot be read or parsed, the configuration is
/// invalid, or the renderer cannot attach to the input.
pub fn mount_from_file<R: SearchRenderer>(
    path: impl AsRef<std::path::Path>,
    renderer: R,
) -> anyhow::Result<RemoteSearch<R>> {
    let config = SearchConfig::from_json_file(path)?;
    Ok(RemoteSearch::mount_http(config, renderer)?)
}
