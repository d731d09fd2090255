//! Type-safe builder for `SearchConfig` using the typestate pattern
//!
//! The input selector and an endpoint are required; `build()` only exists
//! once both are set. Everything else has a default.

use std::marker::PhantomData;
use std::time::Duration;

use super::types::{ResultsCallback, SearchConfig, SelectCallback};
use crate::items::{ItemsExtractor, LabelStrategy};
use crate::layout::Placement;
use crate::utils::{
    DEFAULT_MIN_LEN, DEFAULT_PLACEHOLDER, DEFAULT_REQUEST_TIMEOUT, DEFAULT_SEARCH_QUERY_PARAM,
    DEFAULT_TYPING_DELAY, parse_absolute_endpoint, resolve_endpoint,
};
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

// Type states for the builder
pub struct WithInputSelector;
pub struct WithEndpoint;

/// Where the endpoint came from, resolved at `build()`
#[derive(Debug, Clone)]
pub(crate) enum EndpointSource {
    Absolute(String),
    Relative(String),
}

pub struct SearchConfigBuilder<State = ()> {
    pub(crate) input_selector: Option<String>,
    pub(crate) endpoint: Option<EndpointSource>,
    pub(crate) base_url: Option<String>,
    pub(crate) min_len: usize,
    pub(crate) url_query_params: Vec<(String, String)>,
    pub(crate) search_query_param: String,
    pub(crate) items: ItemsExtractor,
    pub(crate) item_label: LabelStrategy,
    pub(crate) placeholder: String,
    pub(crate) hide_on_blur: bool,
    pub(crate) highlight_match: bool,
    pub(crate) spinner_placement: Placement,
    pub(crate) list_placement: Placement,
    pub(crate) typing_delay: Duration,
    pub(crate) request_timeout: Duration,
    pub(crate) on_get_results: Option<ResultsCallback>,
    pub(crate) on_click_item: Option<SelectCallback>,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for SearchConfigBuilder<()> {
    fn default() -> Self {
        Self {
            input_selector: None,
            endpoint: None,
            base_url: None,
            min_len: DEFAULT_MIN_LEN,
            url_query_params: Vec::new(),
            search_query_param: DEFAULT_SEARCH_QUERY_PARAM.to_string(),
            items: ItemsExtractor::default(),
            item_label: LabelStrategy::default(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            hide_on_blur: true,
            highlight_match: false,
            spinner_placement: Placement::Anchored,
            list_placement: Placement::Anchored,
            typing_delay: DEFAULT_TYPING_DELAY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            on_get_results: None,
            on_click_item: None,
            _phantom: PhantomData,
        }
    }
}

impl SearchConfig {
    /// Create a builder for configuring a `SearchConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> SearchConfigBuilder<()> {
        SearchConfigBuilder::default()
    }
}

impl<State> SearchConfigBuilder<State> {
    fn into_state<Next>(self) -> SearchConfigBuilder<Next> {
        SearchConfigBuilder {
            input_selector: self.input_selector,
            endpoint: self.endpoint,
            base_url: self.base_url,
            min_len: self.min_len,
            url_query_params: self.url_query_params,
            search_query_param: self.search_query_param,
            items: self.items,
            item_label: self.item_label,
            placeholder: self.placeholder,
            hide_on_blur: self.hide_on_blur,
            highlight_match: self.highlight_match,
            spinner_placement: self.spinner_placement,
            list_placement: self.list_placement,
            typing_delay: self.typing_delay,
            request_timeout: self.request_timeout,
            on_get_results: self.on_get_results,
            on_click_item: self.on_click_item,
            _phantom: PhantomData,
        }
    }
}

impl SearchConfigBuilder<()> {
    pub fn input_selector(
        mut self,
        selector: impl Into<String>,
    ) -> SearchConfigBuilder<WithInputSelector> {
        self.input_selector = Some(selector.into());
        self.into_state()
    }
}

impl SearchConfigBuilder<WithInputSelector> {
    /// Search against an absolute http(s) url
    pub fn absolute_url(mut self, url: impl Into<String>) -> SearchConfigBuilder<WithEndpoint> {
        self.endpoint = Some(EndpointSource::Absolute(url.into()));
        self.into_state()
    }

    /// Search against a path resolved onto [`base_url`](SearchConfigBuilder::base_url)
    pub fn relative_url(mut self, path: impl Into<String>) -> SearchConfigBuilder<WithEndpoint> {
        self.endpoint = Some(EndpointSource::Relative(path.into()));
        self.into_state()
    }
}

// Build method only available when all required fields are set
impl SearchConfigBuilder<WithEndpoint> {
    /// Validate and freeze the configuration
    ///
    /// # Errors
    ///
    /// Returns [`RemoteSearchError::Configuration`] for an empty selector or
    /// search parameter, a non-http absolute url, or a relative url without a
    /// usable base url.
    pub fn build(self) -> RemoteSearchResult<SearchConfig> {
        let input_selector = self
            .input_selector
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| RemoteSearchError::Configuration("input selector is required".into()))?;

        if self.search_query_param.trim().is_empty() {
            return Err(RemoteSearchError::Configuration(
                "search query parameter name cannot be empty".into(),
            ));
        }

        let endpoint = match self.endpoint {
            Some(EndpointSource::Absolute(url)) => {
                let resolved = parse_absolute_endpoint(&url)?;
                if self.base_url.is_some() {
                    tracing::debug!(url = %resolved, "Absolute url given, ignoring base url");
                }
                resolved
            }
            Some(EndpointSource::Relative(path)) => {
                resolve_endpoint(&path, self.base_url.as_deref())?
            }
            None => {
                return Err(RemoteSearchError::Configuration("No url provided.".into()));
            }
        };

        Ok(SearchConfig {
            input_selector,
            min_len: self.min_len,
            endpoint,
            url_query_params: self.url_query_params,
            search_query_param: self.search_query_param,
            items: self.items,
            item_label: self.item_label,
            placeholder: self.placeholder,
            hide_on_blur: self.hide_on_blur,
            highlight_match: self.highlight_match,
            spinner_placement: self.spinner_placement,
            list_placement: self.list_placement,
            typing_delay: self.typing_delay,
            request_timeout: self.request_timeout,
            on_get_results: self.on_get_results,
            on_click_item: self.on_click_item,
        })
    }
}
