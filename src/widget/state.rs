//! Mutable per-widget state

use serde::{Deserialize, Serialize};

use crate::items::ResultItem;

/// Where the widget is in the search cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Keystrokes arriving, typing delay running
    Typing,
    /// Request in flight
    Loading,
    /// Latest request rendered its items
    Results,
    /// Latest request failed
    Failed,
}

/// State of one widget instance
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    input: String,
    phase: SearchPhase,
    /// Highest sequence token handed out; responses with a lower one are stale
    latest_seq: u64,
    in_flight: Option<u64>,
    items: Vec<ResultItem>,
}

impl SearchState {
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[must_use]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    /// Token of the request currently awaited, if any
    #[must_use]
    pub fn in_flight(&self) -> Option<u64> {
        self.in_flight
    }

    /// Items behind the rows currently rendered
    #[must_use]
    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    /// A keystroke voids the current results and any in-flight request
    ///
    /// Returns true if a request was in flight.
    pub(crate) fn begin_typing(&mut self, input: &str) -> bool {
        self.input = input.to_string();
        self.phase = SearchPhase::Typing;
        self.items.clear();
        self.latest_seq += 1;
        self.in_flight.take().is_some()
    }

    pub(crate) fn settle_below_threshold(&mut self) {
        if self.phase == SearchPhase::Typing {
            self.phase = SearchPhase::Idle;
        }
    }

    pub(crate) fn begin_request(&mut self, settled: &str) -> u64 {
        self.latest_seq += 1;
        self.input = settled.to_string();
        self.in_flight = Some(self.latest_seq);
        self.phase = SearchPhase::Loading;
        self.latest_seq
    }

    #[must_use]
    pub(crate) fn is_latest(&self, seq: u64) -> bool {
        self.in_flight == Some(seq)
    }

    pub(crate) fn finish_with_items(&mut self, items: Vec<ResultItem>) {
        self.in_flight = None;
        self.items = items;
        self.phase = SearchPhase::Results;
    }

    pub(crate) fn finish_with_error(&mut self) {
        self.in_flight = None;
        self.items.clear();
        self.phase = SearchPhase::Failed;
    }

    /// Drop the rendered items without touching any in-flight request
    pub(crate) fn clear_results(&mut self) {
        self.items.clear();
        if matches!(self.phase, SearchPhase::Results | SearchPhase::Failed) {
            self.phase = SearchPhase::Idle;
        }
    }

    pub(crate) fn select(&mut self, label: &str) {
        self.input = label.to_string();
        self.items.clear();
        self.phase = SearchPhase::Idle;
    }
}
