//! Convenience builder for HTTP query parameters.
//!
//! This module provides a lightweight helper for constructing URL query pairs,
//! reducing boilerplate in the endpoint definitions.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair. Empty values are kept (`key=`).
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Chaining form of [`QueryParams::push`].
    #[must_use]
    pub fn with<T>(mut self, key: &'static str, value: T) -> Self
    where
        T: Display,
    {
        self.push(key, value);
        self
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_keeps_empty_values() {
        let params = QueryParams::new().with("hostname", "");
        assert_eq!(params.into_pairs(), vec![("hostname", String::new())]);
    }

    #[test]
    fn pairs_preserve_insertion_order() {
        let mut params = QueryParams::new();
        params.push("includeConditionException", true);
        params.push("hostname", "www.example.com");
        assert_eq!(
            params.into_pairs(),
            vec![
                ("includeConditionException", "true".to_string()),
                ("hostname", "www.example.com".to_string()),
            ]
        );
    }
}
