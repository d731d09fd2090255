//! Marking the searched text inside row labels

use regex::{Regex, RegexBuilder};
use std::fmt;

use crate::utils::HIGHLIGHT_CLASS;

/// A run of label text, either plain or matching the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSegment {
    Plain(String),
    Match(String),
}

/// A label split into plain and matching segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HighlightedLabel {
    segments: Vec<LabelSegment>,
}

impl HighlightedLabel {
    /// A label with no matches
    #[must_use]
    pub fn plain(label: &str) -> Self {
        let segments = if label.is_empty() {
            Vec::new()
        } else {
            vec![LabelSegment::Plain(label.to_string())]
        };
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[LabelSegment] {
        &self.segments
    }

    #[must_use]
    pub fn has_matches(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, LabelSegment::Match(_)))
    }

    /// Escaped HTML with matches wrapped in a highlight span
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment {
                LabelSegment::Plain(text) => html.push_str(&html_escape::encode_text(text)),
                LabelSegment::Match(text) => {
                    html.push_str("<span class='");
                    html.push_str(HIGHLIGHT_CLASS);
                    html.push_str("'>");
                    html.push_str(&html_escape::encode_text(text));
                    html.push_str("</span>");
                }
            }
        }
        html
    }
}

impl fmt::Display for HighlightedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                LabelSegment::Plain(text) | LabelSegment::Match(text) => f.write_str(text)?,
            }
        }
        Ok(())
    }
}

/// Case-insensitive literal matcher for one settled search value
///
/// Compiled once per render and applied to every row.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    #[must_use]
    pub fn new(search: &str) -> Self {
        if search.is_empty() {
            return Self { pattern: None };
        }

        let pattern = RegexBuilder::new(&regex::escape(search))
            .case_insensitive(true)
            .build();

        match pattern {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(e) => {
                tracing::debug!(error = %e, "Search text too large to highlight");
                Self { pattern: None }
            }
        }
    }

    #[must_use]
    pub fn highlight(&self, label: &str) -> HighlightedLabel {
        let Some(pattern) = &self.pattern else {
            return HighlightedLabel::plain(label);
        };

        let mut segments = Vec::new();
        let mut last = 0;
        for m in pattern.find_iter(label) {
            if m.start() > last {
                segments.push(LabelSegment::Plain(label[last..m.start()].to_string()));
            }
            segments.push(LabelSegment::Match(m.as_str().to_string()));
            last = m.end();
        }
        if last < label.len() {
            segments.push(LabelSegment::Plain(label[last..].to_string()));
        }

        HighlightedLabel { segments }
    }
}
