//! JSON options file
//!
//! The serialisable part of the configuration surface, for hosts that keep
//! widget options next to the rest of their settings. Callbacks and custom
//! strategies are code-only and are added on the returned builder.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use super::builder::{SearchConfigBuilder, WithEndpoint};
use super::types::SearchConfig;
use crate::items::ItemsExtractor;
use crate::layout::Placement;
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    pub input_selector: String,
    /// Takes precedence over `relative_url` when both are set
    pub absolute_url: Option<String>,
    pub relative_url: Option<String>,
    pub base_url: Option<String>,
    pub min_len: Option<usize>,
    pub url_query_params: BTreeMap<String, String>,
    pub search_query_param: Option<String>,
    pub item_label: Option<String>,
    /// Dotted path to the item array; absent means root array or `items`
    pub items_field: Option<String>,
    pub placeholder: Option<String>,
    pub hide_on_blur: Option<bool>,
    pub highlight_match: Option<bool>,
    pub spinner_placement: Option<Placement>,
    pub list_placement: Option<Placement>,
    pub typing_delay_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
}

impl SearchOptions {
    /// Read options from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read search options from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Invalid search options in {}", path.display()))
    }

    /// Turn the options into a builder ready for code-only additions
    ///
    /// # Errors
    ///
    /// Returns [`RemoteSearchError::Configuration`] when no url is set.
    pub fn into_builder(self) -> RemoteSearchResult<SearchConfigBuilder<WithEndpoint>> {
        let builder = SearchConfig::builder().input_selector(self.input_selector);
        let mut builder = match (self.absolute_url, self.relative_url) {
            (Some(url), _) => builder.absolute_url(url),
            (None, Some(path)) => builder.relative_url(path),
            (None, None) => {
                return Err(RemoteSearchError::Configuration("No url provided.".into()));
            }
        };

        if let Some(base) = self.base_url {
            builder = builder.base_url(base);
        }
        if let Some(min_len) = self.min_len {
            builder = builder.min_len(min_len);
        }
        builder = builder.query_params(self.url_query_params);
        if let Some(param) = self.search_query_param {
            builder = builder.search_query_param(param);
        }
        if let Some(key) = self.item_label {
            builder = builder.item_label(key);
        }
        if let Some(field) = self.items_field {
            builder = builder.items(ItemsExtractor::Field(field));
        }
        if let Some(placeholder) = self.placeholder {
            builder = builder.placeholder(placeholder);
        }
        if let Some(hide) = self.hide_on_blur {
            builder = builder.hide_on_blur(hide);
        }
        if let Some(highlight) = self.highlight_match {
            builder = builder.highlight_match(highlight);
        }
        if let Some(placement) = self.spinner_placement {
            builder = builder.spinner_placement(placement);
        }
        if let Some(placement) = self.list_placement {
            builder = builder.list_placement(placement);
        }
        if let Some(ms) = self.typing_delay_ms {
            builder = builder.typing_delay(Duration::from_millis(ms));
        }
        if let Some(ms) = self.request_timeout_ms {
            builder = builder.request_timeout(Duration::from_millis(ms));
        }

        Ok(builder)
    }
}

impl SearchConfig {
    /// Load and validate a configuration from a JSON options file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let options = SearchOptions::from_json_file(path)?;
        let config = options.into_builder()?.build()?;
        Ok(config)
    }
}
