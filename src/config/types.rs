//! Core configuration types for the remote search widget

use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::fetch::ResponseMeta;
use crate::items::{ItemsExtractor, LabelStrategy, ResultItem};
use crate::layout::Placement;

/// Called with the raw body and response details when fresh results arrive
pub type ResultsCallback = Arc<dyn Fn(&Value, &ResponseMeta) + Send + Sync>;

/// Called with the original item when the user selects a row
pub type SelectCallback = Arc<dyn Fn(&ResultItem) + Send + Sync>;

/// Immutable widget configuration, captured once at construction
#[derive(Clone)]
pub struct SearchConfig {
    /// Selector of the input the widget attaches to
    pub(crate) input_selector: String,
    /// Settled values shorter than this (in characters) never trigger a request
    pub(crate) min_len: usize,
    /// Resolved absolute endpoint; relative endpoints are joined onto the base url
    pub(crate) endpoint: Url,
    /// Static query parameters, in insertion order
    pub(crate) url_query_params: Vec<(String, String)>,
    /// Query parameter carrying the settled value; wins over static params
    pub(crate) search_query_param: String,
    pub(crate) items: ItemsExtractor,
    pub(crate) item_label: LabelStrategy,
    pub(crate) placeholder: String,
    pub(crate) hide_on_blur: bool,
    pub(crate) highlight_match: bool,
    pub(crate) spinner_placement: Placement,
    pub(crate) list_placement: Placement,
    /// Quiet period after the last keystroke before the value settles
    pub(crate) typing_delay: Duration,
    pub(crate) request_timeout: Duration,
    pub(crate) on_get_results: Option<ResultsCallback>,
    pub(crate) on_click_item: Option<SelectCallback>,
}

impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("input_selector", &self.input_selector)
            .field("min_len", &self.min_len)
            .field("endpoint", &self.endpoint.as_str())
            .field("url_query_params", &self.url_query_params)
            .field("search_query_param", &self.search_query_param)
            .field("items", &self.items)
            .field("item_label", &self.item_label)
            .field("placeholder", &self.placeholder)
            .field("hide_on_blur", &self.hide_on_blur)
            .field("highlight_match", &self.highlight_match)
            .field("spinner_placement", &self.spinner_placement)
            .field("list_placement", &self.list_placement)
            .field("typing_delay", &self.typing_delay)
            .field("request_timeout", &self.request_timeout)
            .field("on_get_results", &self.on_get_results.is_some())
            .field("on_click_item", &self.on_click_item.is_some())
            .finish()
    }
}

impl SearchConfig {
    /// Url for one search: endpoint, static params, then the settled value
    ///
    /// Any other pair named like the search param, on the endpoint or among
    /// the static params, is dropped so the settled value always wins.
    #[must_use]
    pub fn request_url(&self, settled: &str) -> Url {
        let key = self.search_query_param.as_str();
        let existing: Vec<(String, String)> = self
            .endpoint
            .query_pairs()
            .filter(|(k, _)| k != key)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let mut url = self.endpoint.clone();
        url.set_query(None);
        {
            let mut query = url.query_pairs_mut();
            query.extend_pairs(existing);
            for (k, v) in &self.url_query_params {
                if k != key {
                    query.append_pair(k, v);
                }
            }
            query.append_pair(key, settled);
        }
        url
    }

    /// Whether a settled value is long enough to search
    #[must_use]
    pub fn meets_threshold(&self, settled: &str) -> bool {
        settled.chars().count() >= self.min_len
    }
}
