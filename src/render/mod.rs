//! Rendering seam between the search cycle and the host UI
//!
//! The widget never touches a concrete UI. It drives a [`SearchRenderer`],
//! which owns whatever handles the host has (DOM nodes, terminal, a test
//! recorder) for the input, the result list and the spinner.

mod memory;
mod terminal;

pub use memory::{MemoryRenderer, MemoryView};
pub use terminal::TerminalRenderer;

use crate::items::HighlightedLabel;
use crate::layout::{InputRect, Position};
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

/// What the renderer needs to attach to the host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputBinding<'a> {
    pub selector: &'a str,
    pub placeholder: &'a str,
}

/// One row of the result list
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Position in the rendered list; pass it back to `RemoteSearch::select`
    pub index: usize,
    pub label: String,
    /// Present when match highlighting is enabled
    pub highlighted: Option<HighlightedLabel>,
}

/// Host-side operations the search cycle drives
///
/// Called with the widget's state lock held, so implementations must not
/// call back into the widget.
pub trait SearchRenderer: Send + Sync + 'static {
    /// Bind to the input, create the list container and spinner, turn off
    /// native autocomplete and apply the placeholder
    ///
    /// # Errors
    ///
    /// [`RemoteSearchError::Configuration`] when the selector resolves to
    /// nothing.
    fn attach(&self, binding: &InputBinding<'_>) -> RemoteSearchResult<()>;

    /// Current input rectangle and scroll offset
    fn input_rect(&self) -> InputRect;

    fn place_spinner(&self, position: Position);

    fn place_list(&self, position: Position);

    fn set_loading(&self, loading: bool);

    /// Show or hide the list container's border
    fn set_list_visible(&self, visible: bool);

    fn clear_list(&self);

    /// Append rows to the list, in order
    fn render(&self, rows: &[ResultRow]);

    fn set_error(&self, error: &RemoteSearchError);

    /// Remove any error shown for a previous cycle
    fn clear_error(&self) {}

    fn set_input_value(&self, value: &str);
}
