//! Result items: extraction from response bodies, labels, and match highlighting

mod extract;
mod highlight;
mod label;

pub use extract::{ExtractFn, ItemsExtractor};
pub use highlight::{HighlightedLabel, Highlighter, LabelSegment};
pub use label::{LabelFn, LabelStrategy};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record returned by the remote endpoint
///
/// Opaque to the widget: the only contract is that the configured
/// [`LabelStrategy`] can derive a display string from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultItem(Value);

impl ResultItem {
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Look up a top-level key on object items
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for ResultItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
