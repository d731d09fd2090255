//! Debounce-triggered fetch-and-render cycle

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::errors::{RemoteSearchError, RemoteSearchResult};
use super::events::SearchEvent;
use super::state::SearchState;
use crate::config::SearchConfig;
use crate::fetch::{FetchResponse, Fetcher, HttpFetcher};
use crate::items::{Highlighter, ResultItem};
use crate::render::{InputBinding, ResultRow, SearchRenderer};
use crate::typing_delay::TypingDelayer;
use crate::utils::EVENT_CHANNEL_CAPACITY;

/// How a settled value was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Shorter than the minimum length; nothing happened
    BelowThreshold,
    /// The response was rendered as `count` rows
    Rendered { seq: u64, count: usize },
    /// A newer request or keystroke superseded this one; nothing was rendered
    Stale { seq: u64 },
}

struct Inner<R, F> {
    config: SearchConfig,
    renderer: R,
    fetcher: F,
    state: Mutex<SearchState>,
    delayer: TypingDelayer,
    events: broadcast::Sender<SearchEvent>,
}

/// A mounted remote search widget
///
/// Cheap to clone; clones drive the same widget.
pub struct RemoteSearch<R, F = HttpFetcher> {
    inner: Arc<Inner<R, F>>,
}

impl<R, F> Clone for RemoteSearch<R, F> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: SearchRenderer> RemoteSearch<R, HttpFetcher> {
    /// Mount with a `reqwest` fetcher using the configured request timeout
    ///
    /// # Errors
    ///
    /// Same as [`RemoteSearch::mount`], plus HTTP client construction failures.
    pub fn mount_http(config: SearchConfig, renderer: R) -> RemoteSearchResult<Self> {
        let fetcher = HttpFetcher::new(config.request_timeout())?;
        Self::mount(config, renderer, fetcher)
    }
}

impl<R: SearchRenderer, F: Fetcher> RemoteSearch<R, F> {
    /// Attach to the host input and prepare the list and spinner
    ///
    /// # Errors
    ///
    /// [`RemoteSearchError::Configuration`] when the renderer cannot resolve
    /// the input selector. Setup halts; nothing is left half-mounted.
    pub fn mount(config: SearchConfig, renderer: R, fetcher: F) -> RemoteSearchResult<Self> {
        renderer.attach(&InputBinding {
            selector: config.input_selector(),
            placeholder: config.placeholder(),
        })?;

        renderer.clear_list();
        renderer.set_list_visible(false);
        renderer.set_loading(false);

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let delayer = TypingDelayer::new(config.typing_delay());
        let widget = Self {
            inner: Arc::new(Inner {
                config,
                renderer,
                fetcher,
                state: Mutex::new(SearchState::default()),
                delayer,
                events,
            }),
        };
        widget.reposition();

        tracing::info!(
            selector = widget.inner.config.input_selector(),
            endpoint = %widget.inner.config.endpoint(),
            min_len = widget.inner.config.min_len(),
            "Remote search mounted"
        );
        Ok(widget)
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.inner.renderer
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.inner.state.lock().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.inner.events.subscribe()
    }

    /// Recompute spinner and list positions from the current input rectangle
    ///
    /// Call on mount (done automatically) and whenever the host layout
    /// changes, e.g. on window resize.
    pub fn reposition(&self) {
        let config = &self.inner.config;
        let renderer = &self.inner.renderer;
        let rect = renderer.input_rect();
        renderer.place_spinner(config.spinner_placement().spinner_position(&rect));
        renderer.place_list(config.list_placement().list_position(&rect));
    }

    /// A keystroke changed the input text
    ///
    /// Clears the list and hides its border immediately, voids any in-flight
    /// request and restarts the typing delay. Must be called inside a tokio
    /// runtime.
    pub fn on_input(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut state = self.inner.state.lock();
            let was_loading = state.begin_typing(&text);
            let renderer = &self.inner.renderer;
            renderer.clear_list();
            renderer.set_list_visible(false);
            renderer.clear_error();
            if was_loading {
                renderer.set_loading(false);
            }
        }
        self.publish(SearchEvent::typing(&text));

        let widget = self.clone();
        self.inner.delayer.schedule(text, move |settled| async move {
            if let Err(e) = widget.search_after_typing_stopped(&settled).await {
                tracing::debug!(value = %settled, error = %e, "Search cycle ended with error");
            }
        });
    }

    /// Run one search cycle for a settled value
    ///
    /// Called by the typing delay once the user stops typing; hosts with
    /// their own debounce can call it directly.
    ///
    /// # Errors
    ///
    /// `Network`, `Server` or `Extraction` when the latest request fails.
    /// The spinner is hidden and the renderer has received `set_error`.
    /// Stale failures are discarded like stale successes.
    pub async fn search_after_typing_stopped(
        &self,
        settled: &str,
    ) -> RemoteSearchResult<SearchOutcome> {
        let config = &self.inner.config;

        if !config.meets_threshold(settled) {
            self.inner.state.lock().settle_below_threshold();
            tracing::debug!(
                value = settled,
                min_len = config.min_len(),
                "Settled value below minimum length"
            );
            self.publish(SearchEvent::skipped(settled, config.min_len()));
            return Ok(SearchOutcome::BelowThreshold);
        }

        let url = config.request_url(settled);
        let seq = {
            let mut state = self.inner.state.lock();
            let seq = state.begin_request(settled);
            self.inner.renderer.clear_error();
            self.inner.renderer.set_loading(true);
            seq
        };
        tracing::debug!(seq, url = %url, "Search request issued");
        self.publish(SearchEvent::request_issued(seq, &url));

        let result = self.inner.fetcher.get_json(url).await;

        if !self.inner.state.lock().is_latest(seq) {
            return Ok(self.discard(seq));
        }

        let result = result.and_then(|response| self.extract(response));
        match result {
            Ok(items) => self.finish(seq, settled, items),
            Err(error) => self.fail(seq, error),
        }
    }

    /// Results callback and item extraction, outside the state lock
    fn extract(&self, response: FetchResponse) -> RemoteSearchResult<Vec<ResultItem>> {
        let config = &self.inner.config;
        if let Some(on_get_results) = &config.on_get_results {
            on_get_results(&response.body, &response.meta);
        }
        config.items().extract(&response.body)
    }

    fn finish(
        &self,
        seq: u64,
        settled: &str,
        items: Vec<ResultItem>,
    ) -> RemoteSearchResult<SearchOutcome> {
        let rows = self.rows(settled, &items);
        let count = rows.len();
        {
            let mut state = self.inner.state.lock();
            if !state.is_latest(seq) {
                drop(state);
                return Ok(self.discard(seq));
            }
            state.finish_with_items(items);

            let renderer = &self.inner.renderer;
            renderer.set_loading(false);
            renderer.clear_list();
            renderer.set_list_visible(true);
            renderer.render(&rows);
        }

        tracing::debug!(seq, count, "Search results rendered");
        self.publish(SearchEvent::results_rendered(seq, count));
        Ok(SearchOutcome::Rendered { seq, count })
    }

    /// A failed cycle clears the previous list and keeps its border hidden
    fn fail(&self, seq: u64, error: RemoteSearchError) -> RemoteSearchResult<SearchOutcome> {
        {
            let mut state = self.inner.state.lock();
            if !state.is_latest(seq) {
                drop(state);
                tracing::debug!(seq, error = %error, "Stale search failed");
                return Ok(self.discard(seq));
            }
            state.finish_with_error();

            let renderer = &self.inner.renderer;
            renderer.set_loading(false);
            renderer.clear_list();
            renderer.set_list_visible(false);
            renderer.set_error(&error);
        }

        tracing::warn!(seq, error = %error, "Search request failed");
        self.publish(SearchEvent::failed(seq, &error));
        Err(error)
    }

    fn discard(&self, seq: u64) -> SearchOutcome {
        tracing::debug!(seq, "Discarding stale search response");
        self.publish(SearchEvent::stale_discarded(seq));
        SearchOutcome::Stale { seq }
    }

    fn rows(&self, settled: &str, items: &[ResultItem]) -> Vec<ResultRow> {
        let config = &self.inner.config;
        let highlighter = config.highlight_match().then(|| Highlighter::new(settled));

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = config.item_label().label(item);
                let highlighted = highlighter.as_ref().map(|h| h.highlight(&label));
                ResultRow {
                    index,
                    label,
                    highlighted,
                }
            })
            .collect()
    }

    /// The user clicked a rendered row
    ///
    /// Clears the list, hides the border, writes the row's label into the
    /// input and invokes the selection callback once with the original item.
    ///
    /// # Errors
    ///
    /// [`RemoteSearchError::NoSuchItem`] when no row with that index is
    /// rendered; nothing changes.
    pub fn select(&self, index: usize) -> RemoteSearchResult<ResultItem> {
        let config = &self.inner.config;
        let item = self
            .inner
            .state
            .lock()
            .items()
            .get(index)
            .cloned()
            .ok_or(RemoteSearchError::NoSuchItem(index))?;
        let label = config.item_label().label(&item);

        {
            let mut state = self.inner.state.lock();
            // A keystroke or focus loss may have cleared the list meanwhile
            if state.items().get(index) != Some(&item) {
                return Err(RemoteSearchError::NoSuchItem(index));
            }
            state.select(&label);

            let renderer = &self.inner.renderer;
            renderer.clear_list();
            renderer.set_list_visible(false);
            renderer.set_input_value(&label);
        }

        tracing::debug!(index, label = %label, "Result selected");
        if let Some(on_click_item) = &config.on_click_item {
            on_click_item(&item);
        }
        self.publish(SearchEvent::item_selected(index, &label));
        Ok(item)
    }

    /// The input lost focus
    ///
    /// With hide-on-blur configured, clears the list and hides its border.
    /// An in-flight request is left alone and still renders when it lands.
    pub fn on_focus_lost(&self) {
        if !self.inner.config.hide_on_blur() {
            return;
        }
        {
            let mut state = self.inner.state.lock();
            state.clear_results();
            self.inner.renderer.clear_list();
            self.inner.renderer.set_list_visible(false);
        }
        self.publish(SearchEvent::list_hidden());
    }

    /// Drop a pending typing-delay fire without touching the list
    pub fn cancel_pending(&self) {
        self.inner.delayer.cancel();
    }

    fn publish(&self, event: SearchEvent) {
        if self.inner.events.send(event).is_err() {
            tracing::trace!("Search event published with no subscribers");
        }
    }
}
