//! Headless renderer that records what a UI would show

use parking_lot::Mutex;

use super::{InputBinding, ResultRow, SearchRenderer};
use crate::layout::{InputRect, Position};
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

/// Everything a [`MemoryRenderer`] has been told to show
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryView {
    pub attached_to: Option<String>,
    pub placeholder: Option<String>,
    pub input_value: String,
    pub loading: bool,
    /// Number of times the spinner was shown
    pub loading_shown: usize,
    pub list_visible: bool,
    pub rows: Vec<ResultRow>,
    pub error: Option<RemoteSearchError>,
    pub spinner_at: Option<Position>,
    pub list_at: Option<Position>,
}

impl MemoryView {
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }
}

/// Renderer for hosts that draw elsewhere, and for tests
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    /// Selectors that resolve; `None` accepts any
    selectors: Option<Vec<String>>,
    rect: Mutex<InputRect>,
    view: Mutex<MemoryView>,
}

impl MemoryRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Only these selectors resolve to an input
    #[must_use]
    pub fn with_selectors<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selectors: Some(selectors.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Simulate the input moving, e.g. after a window resize
    pub fn set_input_rect(&self, rect: InputRect) {
        *self.rect.lock() = rect;
    }

    /// Simulate the user editing the input
    pub fn type_text(&self, text: &str) {
        self.view.lock().input_value = text.to_string();
    }

    #[must_use]
    pub fn snapshot(&self) -> MemoryView {
        self.view.lock().clone()
    }
}

impl SearchRenderer for MemoryRenderer {
    fn attach(&self, binding: &InputBinding<'_>) -> RemoteSearchResult<()> {
        let resolves = self
            .selectors
            .as_ref()
            .is_none_or(|selectors| selectors.iter().any(|s| s == binding.selector));
        if !resolves {
            return Err(RemoteSearchError::Configuration(format!(
                "The provided '{}' selector resolves to no input",
                binding.selector
            )));
        }

        let mut view = self.view.lock();
        view.attached_to = Some(binding.selector.to_string());
        view.placeholder = Some(binding.placeholder.to_string());
        Ok(())
    }

    fn input_rect(&self) -> InputRect {
        *self.rect.lock()
    }

    fn place_spinner(&self, position: Position) {
        self.view.lock().spinner_at = Some(position);
    }

    fn place_list(&self, position: Position) {
        self.view.lock().list_at = Some(position);
    }

    fn set_loading(&self, loading: bool) {
        let mut view = self.view.lock();
        if loading {
            view.loading_shown += 1;
        }
        view.loading = loading;
    }

    fn set_list_visible(&self, visible: bool) {
        self.view.lock().list_visible = visible;
    }

    fn clear_list(&self) {
        self.view.lock().rows.clear();
    }

    fn render(&self, rows: &[ResultRow]) {
        self.view.lock().rows.extend_from_slice(rows);
    }

    fn set_error(&self, error: &RemoteSearchError) {
        self.view.lock().error = Some(error.clone());
    }

    fn clear_error(&self) {
        self.view.lock().error = None;
    }

    fn set_input_value(&self, value: &str) {
        self.view.lock().input_value = value.to_string();
    }
}
