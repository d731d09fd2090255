//! Line-oriented terminal renderer used by the `remote-search` binary

use parking_lot::Mutex;
use std::io::{self, Write};

use super::{InputBinding, ResultRow, SearchRenderer};
use crate::items::LabelSegment;
use crate::layout::{InputRect, Position};
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

const MATCH_STYLE: &str = "\x1b[1;33m";
const DIM_STYLE: &str = "\x1b[2m";
const ERROR_STYLE: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Prints list updates to stdout
///
/// A terminal has no input geometry, so placement is only traced.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    color: bool,
    loading: Mutex<bool>,
}

impl TerminalRenderer {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self {
            color,
            loading: Mutex::new(false),
        }
    }

    fn style(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn row_text(&self, row: &ResultRow) -> String {
        let Some(highlighted) = &row.highlighted else {
            return row.label.clone();
        };

        highlighted
            .segments()
            .iter()
            .map(|segment| match segment {
                LabelSegment::Plain(text) => text.clone(),
                LabelSegment::Match(text) if self.color => self.style(MATCH_STYLE, text),
                LabelSegment::Match(text) => format!("[{text}]"),
            })
            .collect()
    }

    fn line(&self, text: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{text}") {
            tracing::debug!(error = %e, "Failed to write to terminal");
        }
    }
}

impl SearchRenderer for TerminalRenderer {
    fn attach(&self, binding: &InputBinding<'_>) -> RemoteSearchResult<()> {
        self.line(&self.style(DIM_STYLE, binding.placeholder));
        Ok(())
    }

    fn input_rect(&self) -> InputRect {
        InputRect::default()
    }

    fn place_spinner(&self, position: Position) {
        tracing::trace!(?position, "Spinner placed");
    }

    fn place_list(&self, position: Position) {
        tracing::trace!(?position, "List placed");
    }

    fn set_loading(&self, loading: bool) {
        let mut shown = self.loading.lock();
        if loading && !*shown {
            self.line(&self.style(DIM_STYLE, "searching..."));
        }
        *shown = loading;
    }

    fn set_list_visible(&self, visible: bool) {
        if visible {
            self.line(&self.style(DIM_STYLE, "----"));
        }
    }

    fn clear_list(&self) {}

    fn render(&self, rows: &[ResultRow]) {
        if rows.is_empty() {
            self.line(&self.style(DIM_STYLE, "(no results)"));
        }
        for row in rows {
            self.line(&format!("  [{}] {}", row.index, self.row_text(row)));
        }
    }

    fn set_error(&self, error: &RemoteSearchError) {
        self.line(&self.style(ERROR_STYLE, &format!("error: {error}")));
    }

    fn set_input_value(&self, value: &str) {
        self.line(&format!("> {value}"));
    }
}
