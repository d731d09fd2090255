//! Display labels for result items

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use super::ResultItem;
use crate::utils::DEFAULT_LABEL_KEY;

/// Caller-supplied label for an item
pub type LabelFn = dyn Fn(&ResultItem) -> String + Send + Sync;

/// How a row label is derived from an item
#[derive(Clone)]
pub enum LabelStrategy {
    /// The value under a key: strings verbatim, scalars by their JSON text,
    /// missing or null as an empty label
    Field(String),
    /// A custom label function, e.g. joining first and last name
    Custom(Arc<LabelFn>),
}

impl Default for LabelStrategy {
    fn default() -> Self {
        Self::Field(DEFAULT_LABEL_KEY.to_string())
    }
}

impl fmt::Debug for LabelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(key) => f.debug_tuple("Field").field(key).finish(),
            Self::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

impl LabelStrategy {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&ResultItem) -> String + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    #[must_use]
    pub fn label(&self, item: &ResultItem) -> String {
        match self {
            Self::Field(key) => match item.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            },
            Self::Custom(f) => (**f)(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_labels() {
        let strategy = LabelStrategy::Field("name".into());
        assert_eq!(strategy.label(&json!({"name": "Mary"}).into()), "Mary");
        assert_eq!(strategy.label(&json!({"name": 42}).into()), "42");
        assert_eq!(strategy.label(&json!({"name": null}).into()), "");
        assert_eq!(strategy.label(&json!({"title": "x"}).into()), "");
    }

    #[test]
    fn custom_labels() {
        let strategy = LabelStrategy::custom(|item| {
            let part = |key| item.get(key).and_then(Value::as_str).unwrap_or_default();
            format!("{} {}", part("firstname"), part("lastname"))
        });
        let item = json!({"firstname": "Mary", "lastname": "Poppins"}).into();
        assert_eq!(strategy.label(&item), "Mary Poppins");
    }
}
