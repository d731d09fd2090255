//! Events published by a widget as it moves through the search cycle
//!
//! Hosts and tests subscribe through `RemoteSearch::subscribe` to observe the
//! cycle without polling the renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event types emitted during the search cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SearchEvent {
    /// A keystroke cleared the list and restarted the typing delay
    Typing {
        value: String,
        timestamp: DateTime<Utc>,
    },
    /// The settled value was shorter than the minimum length
    Skipped {
        value: String,
        min_len: usize,
        timestamp: DateTime<Utc>,
    },
    /// A request went out
    RequestIssued {
        seq: u64,
        url: String,
        timestamp: DateTime<Utc>,
    },
    /// The latest request rendered its rows
    ResultsRendered {
        seq: u64,
        count: usize,
        timestamp: DateTime<Utc>,
    },
    /// A response arrived after a newer request or keystroke and was dropped
    StaleDiscarded {
        seq: u64,
        timestamp: DateTime<Utc>,
    },
    /// The latest request failed
    Failed {
        seq: u64,
        error: String,
        timestamp: DateTime<Utc>,
    },
    /// A row was selected and its label written into the input
    ItemSelected {
        index: usize,
        label: String,
        timestamp: DateTime<Utc>,
    },
    /// Focus loss cleared and hid the list
    ListHidden { timestamp: DateTime<Utc> },
}

/// Helper functions for creating events
impl SearchEvent {
    #[must_use]
    pub fn typing(value: &str) -> Self {
        Self::Typing {
            value: value.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn skipped(value: &str, min_len: usize) -> Self {
        Self::Skipped {
            value: value.to_string(),
            min_len,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn request_issued(seq: u64, url: &url::Url) -> Self {
        Self::RequestIssued {
            seq,
            url: url.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn results_rendered(seq: u64, count: usize) -> Self {
        Self::ResultsRendered {
            seq,
            count,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn stale_discarded(seq: u64) -> Self {
        Self::StaleDiscarded {
            seq,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn failed(seq: u64, error: &impl std::fmt::Display) -> Self {
        Self::Failed {
            seq,
            error: error.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn item_selected(index: usize, label: &str) -> Self {
        Self::ItemSelected {
            index,
            label: label.to_string(),
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn list_hidden() -> Self {
        Self::ListHidden {
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::Typing { timestamp, .. }
            | Self::Skipped { timestamp, .. }
            | Self::RequestIssued { timestamp, .. }
            | Self::ResultsRendered { timestamp, .. }
            | Self::StaleDiscarded { timestamp, .. }
            | Self::Failed { timestamp, .. }
            | Self::ItemSelected { timestamp, .. }
            | Self::ListHidden { timestamp } => *timestamp,
        }
    }

    /// Whether this event ends a search cycle
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Skipped { .. }
                | Self::ResultsRendered { .. }
                | Self::StaleDiscarded { .. }
                | Self::Failed { .. }
        )
    }
}
