//! Getter methods for `SearchConfig`

use std::time::Duration;
use url::Url;

use super::types::SearchConfig;
use crate::items::{ItemsExtractor, LabelStrategy};
use crate::layout::Placement;

impl SearchConfig {
    #[must_use]
    pub fn input_selector(&self) -> &str {
        &self.input_selector
    }

    #[must_use]
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    #[must_use]
    pub fn url_query_params(&self) -> &[(String, String)] {
        &self.url_query_params
    }

    #[must_use]
    pub fn search_query_param(&self) -> &str {
        &self.search_query_param
    }

    #[must_use]
    pub fn items(&self) -> &ItemsExtractor {
        &self.items
    }

    #[must_use]
    pub fn item_label(&self) -> &LabelStrategy {
        &self.item_label
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[must_use]
    pub fn hide_on_blur(&self) -> bool {
        self.hide_on_blur
    }

    #[must_use]
    pub fn highlight_match(&self) -> bool {
        self.highlight_match
    }

    #[must_use]
    pub fn spinner_placement(&self) -> Placement {
        self.spinner_placement
    }

    #[must_use]
    pub fn list_placement(&self) -> Placement {
        self.list_placement
    }

    #[must_use]
    pub fn typing_delay(&self) -> Duration {
        self.typing_delay
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
