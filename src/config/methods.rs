//! Builder methods available for all states
//!
//! This module contains methods that can be called on the builder
//! regardless of its current type state.

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use super::builder::SearchConfigBuilder;
use crate::fetch::ResponseMeta;
use crate::items::{ItemsExtractor, LabelStrategy, ResultItem};
use crate::layout::Placement;

impl<State> SearchConfigBuilder<State> {
    /// Minimum settled length (in characters) that triggers a search
    ///
    /// Default: 3
    #[must_use]
    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    /// Base url that relative endpoints are resolved against
    #[must_use]
    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = Some(base.into());
        self
    }

    /// Add one static query parameter
    ///
    /// Replaces an earlier parameter with the same key, keeping its position.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.url_query_params.iter_mut().find(|(k, _)| *k == key) {
            Some(existing) => existing.1 = value,
            None => self.url_query_params.push((key, value)),
        }
        self
    }

    /// Add several static query parameters
    #[must_use]
    pub fn query_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        params
            .into_iter()
            .fold(self, |builder, (k, v)| builder.query_param(k, v))
    }

    /// Name of the query parameter carrying the settled value
    ///
    /// Default: `search_term`
    #[must_use]
    pub fn search_query_param(mut self, name: impl Into<String>) -> Self {
        self.search_query_param = name.into();
        self
    }

    #[must_use]
    pub fn items(mut self, extractor: ItemsExtractor) -> Self {
        self.items = extractor;
        self
    }

    /// Shorthand for [`ItemsExtractor::Custom`]
    #[must_use]
    pub fn items_from<F>(self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<Vec<Value>> + Send + Sync + 'static,
    {
        self.items(ItemsExtractor::custom(f))
    }

    /// Label rows with the value under `key`
    ///
    /// Default: `name`
    #[must_use]
    pub fn item_label(mut self, key: impl Into<String>) -> Self {
        self.item_label = LabelStrategy::Field(key.into());
        self
    }

    /// Label rows with a custom function
    #[must_use]
    pub fn custom_item_label<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResultItem) -> String + Send + Sync + 'static,
    {
        self.item_label = LabelStrategy::custom(f);
        self
    }

    /// Default: `search...`
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Clear and hide the list when the input loses focus
    ///
    /// Default: true
    #[must_use]
    pub fn hide_on_blur(mut self, hide: bool) -> Self {
        self.hide_on_blur = hide;
        self
    }

    /// Mark the settled value inside row labels
    ///
    /// Default: false
    #[must_use]
    pub fn highlight_match(mut self, highlight: bool) -> Self {
        self.highlight_match = highlight;
        self
    }

    #[must_use]
    pub fn spinner_placement(mut self, placement: Placement) -> Self {
        self.spinner_placement = placement;
        self
    }

    #[must_use]
    pub fn list_placement(mut self, placement: Placement) -> Self {
        self.list_placement = placement;
        self
    }

    /// Quiet period after the last keystroke
    ///
    /// Default: 500ms
    #[must_use]
    pub fn typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    /// Default: 10s
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Called with the raw body when fresh results arrive, before extraction
    #[must_use]
    pub fn on_get_results<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &ResponseMeta) + Send + Sync + 'static,
    {
        self.on_get_results = Some(Arc::new(f));
        self
    }

    /// Called once with the original item when a row is selected
    #[must_use]
    pub fn on_click_item<F>(mut self, f: F) -> Self
    where
        F: Fn(&ResultItem) + Send + Sync + 'static,
    {
        self.on_click_item = Some(Arc::new(f));
        self
    }
}
