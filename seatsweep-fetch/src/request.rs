//! Immutable description of one API request.

use std::fmt;

/// Description of one GET request against the API.
///
/// A request is built fresh for every page and never mutated once handed to
/// the transport. Query parameters keep insertion order with unique keys;
/// setting an existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    path: String,
    query: Vec<(String, String)>,
}

impl FetchRequest {
    /// Creates a request for the given resource path (e.g. `/users`).
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Adds or replaces a query parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.query.push((key, value)),
        }
        self
    }

    /// The resource path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The query parameters, in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }
}

impl fmt::Display for FetchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.path)?;
        for (i, (k, v)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_keep_insertion_order() {
        let request = FetchRequest::new("/users")
            .with_param("include", "lastLogin")
            .with_param("pageSize", 100)
            .with_param("page", 1);

        let keys: Vec<&str> = request.query().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["include", "pageSize", "page"]);
    }

    #[test]
    fn test_setting_existing_key_replaces_in_place() {
        let request = FetchRequest::new("/users")
            .with_param("page", 1)
            .with_param("pageSize", 100)
            .with_param("page", 2);

        assert_eq!(request.query().len(), 2);
        assert_eq!(request.query()[0], ("page".to_string(), "2".to_string()));
    }

    #[test]
    fn test_display_renders_query_string() {
        let request = FetchRequest::new("/users")
            .with_param("page", 3)
            .with_param("pageSize", 100);
        assert_eq!(request.to_string(), "GET /users?page=3&pageSize=100");

        let bare = FetchRequest::new("/users/me");
        assert_eq!(bare.to_string(), "GET /users/me");
    }
}
