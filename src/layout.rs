//! Placement of the spinner and result list relative to the search input
//!
//! Positions are page coordinates in pixels. The host reports the input's
//! viewport rectangle and the current scroll offset; the widget computes where
//! the spinner and list go and hands the result back to the renderer.

use serde::{Deserialize, Serialize};

use crate::utils::{SPINNER_RIGHT_INSET, SPINNER_TOP_DIVISOR};

/// Viewport rectangle of the input plus the page scroll offset
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl InputRect {
    /// Top-left corner of the input in page coordinates
    #[must_use]
    pub fn page_origin(&self) -> Position {
        Position {
            left: self.left + self.scroll_x,
            top: self.top + self.scroll_y,
        }
    }
}

/// Absolute page position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub left: f64,
    pub top: f64,
}

/// Where an overlay goes relative to the input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Placement {
    /// Built-in anchor: spinner inside the right edge, list under the input
    #[default]
    Anchored,
    /// Fixed offset from the input's top-left corner
    Offset { left: f64, top: f64 },
}

impl Placement {
    #[must_use]
    pub fn spinner_position(&self, rect: &InputRect) -> Position {
        let origin = rect.page_origin();
        match self {
            Placement::Anchored => Position {
                left: origin.left + rect.width - SPINNER_RIGHT_INSET,
                top: origin.top + rect.height / SPINNER_TOP_DIVISOR,
            },
            Placement::Offset { left, top } => Position {
                left: origin.left + left,
                top: origin.top + top,
            },
        }
    }

    #[must_use]
    pub fn list_position(&self, rect: &InputRect) -> Position {
        let origin = rect.page_origin();
        match self {
            Placement::Anchored => Position {
                left: origin.left,
                top: origin.top + rect.height,
            },
            Placement::Offset { left, top } => Position {
                left: origin.left + left,
                top: origin.top + top,
            },
        }
    }
}
