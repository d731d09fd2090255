//! Item extraction from raw response bodies

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::ResultItem;
use crate::utils::DEFAULT_ITEMS_KEY;
use crate::widget::errors::{RemoteSearchError, RemoteSearchResult};

/// Caller-supplied mapping from a response body to its items
pub type ExtractFn = dyn Fn(&Value) -> Option<Vec<Value>> + Send + Sync;

/// Where the items live in a response body
#[derive(Clone, Default)]
pub enum ItemsExtractor {
    /// A root array, or the array under `items`
    #[default]
    Auto,
    /// The body itself is the item array
    Root,
    /// The array under a key; dots descend into nested objects (`data.items`)
    Field(String),
    /// A custom extraction function; `None` means the body has no items
    Custom(Arc<ExtractFn>),
}

impl fmt::Debug for ItemsExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Auto"),
            Self::Root => write!(f, "Root"),
            Self::Field(path) => f.debug_tuple("Field").field(path).finish(),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl ItemsExtractor {
    /// Build a custom extractor from a closure
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Option<Vec<Value>> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Extract the items from a response body
    ///
    /// # Errors
    ///
    /// Returns [`RemoteSearchError::Extraction`] when the body does not have
    /// the shape this extractor expects.
    pub fn extract(&self, body: &Value) -> RemoteSearchResult<Vec<ResultItem>> {
        let items = match self {
            Self::Auto => match body {
                Value::Array(items) => items.clone(),
                Value::Object(map) => match map.get(DEFAULT_ITEMS_KEY) {
                    Some(Value::Array(items)) => items.clone(),
                    _ => {
                        return Err(RemoteSearchError::Extraction(format!(
                            "expected an array or an object with an '{DEFAULT_ITEMS_KEY}' array"
                        )));
                    }
                },
                other => {
                    return Err(RemoteSearchError::Extraction(format!(
                        "expected an array or object, got {}",
                        json_kind(other)
                    )));
                }
            },
            Self::Root => match body {
                Value::Array(items) => items.clone(),
                other => {
                    return Err(RemoteSearchError::Extraction(format!(
                        "expected a root array, got {}",
                        json_kind(other)
                    )));
                }
            },
            Self::Field(path) => match body.pointer(&to_pointer(path)) {
                Some(Value::Array(items)) => items.clone(),
                Some(other) => {
                    return Err(RemoteSearchError::Extraction(format!(
                        "'{path}' is {}, not an array",
                        json_kind(other)
                    )));
                }
                None => {
                    return Err(RemoteSearchError::Extraction(format!(
                        "response has no '{path}' field"
                    )));
                }
            },
            Self::Custom(f) => (**f)(body).ok_or_else(|| {
                RemoteSearchError::Extraction("custom extractor found no items".to_string())
            })?,
        };

        Ok(items.into_iter().map(ResultItem::new).collect())
    }
}

/// `data.items` -> `/data/items`, escaping per RFC 6901
fn to_pointer(path: &str) -> String {
    path.split('.')
        .map(|key| format!("/{}", key.replace('~', "~0").replace('/', "~1")))
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
