//! Context fields attached by child loggers

use crate::Fields;
use serde_json::Value;

/// Fields a child logger stamps onto every record it emits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    fields: Fields,
}

impl Context {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style method for adding a field
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// The context's fields, in insertion order
    #[must_use]
    pub const fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Whether the context carries no fields
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Combine with another context; `other` wins on conflicting keys.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut fields = self.fields.clone();
        for (key, value) in &other.fields {
            fields.insert(key.clone(), value.clone());
        }
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_prefers_other() {
        let parent = Context::new().with_field("context", "a").with_field("region", "eu");
        let child = Context::new().with_field("context", "b");

        let merged = parent.merge(&child);

        assert_eq!(merged.fields().get("context"), Some(&json!("b")));
        assert_eq!(merged.fields().get("region"), Some(&json!("eu")));
        assert_eq!(merged.fields().len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(Context::new().is_empty());
        assert!(!Context::new().with_field("k", 1).is_empty());
    }
}
