//! Error types for the routing core.
//!
//! Request-shaped inputs (paths, cookies, headers) never produce these; they
//! degrade to documented fallbacks instead. These errors cover strict parsing,
//! page-level guards and route table integrity.

use thiserror::Error;

/// A locale code that is not part of the supported set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocaleError {
    #[error("Unknown locale code: '{0}'")]
    Unknown(String),
}

/// A route key name that does not name any page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown route key: '{0}'")]
pub struct UnknownRouteKey(pub String);

/// Integrity violation in a route table.
///
/// These are configuration defects. They are raised when a table is
/// constructed and are expected to be caught by tests, never at request time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteTableError {
    #[error("route '{route}' has an empty path for locale '{locale}'")]
    EmptyPath { route: String, locale: String },

    #[error("route '{route}' path '{path}' for locale '{locale}' is not a valid slug")]
    InvalidPath {
        route: String,
        locale: String,
        path: String,
    },

    #[error("home path must be '/' for locale '{locale}', got '{path}'")]
    HomeNotRoot { locale: String, path: String },

    #[error("route '{route}' is defined more than once")]
    DuplicateRoute { route: String },

    #[error("file path '{file_path}' is shared by routes '{first}' and '{second}'")]
    DuplicateFilePath {
        file_path: String,
        first: String,
        second: String,
    },

    #[error("path '{path}' in locale '{locale}' is shared by routes '{first}' and '{second}'")]
    DuplicatePath {
        path: String,
        locale: String,
        first: String,
        second: String,
    },

    #[error("route table is missing route '{route}'")]
    MissingRoute { route: String },
}

/// Failures surfaced by strict page-level guards.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl RoutingError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_error_message() {
        let err = LocaleError::Unknown("ja".to_string());
        assert_eq!(err.to_string(), "Unknown locale code: 'ja'");
    }

    #[test]
    fn test_duplicate_path_message_names_both_routes() {
        let err = RouteTableError::DuplicatePath {
            path: "/contact".to_string(),
            locale: "en".to_string(),
            first: "contact".to_string(),
            second: "about".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/contact"));
        assert!(msg.contains("contact"));
        assert!(msg.contains("about"));
    }

    #[test]
    fn test_not_found_constructor() {
        let err = RoutingError::not_found("Unknown locale");
        assert_eq!(err, RoutingError::NotFound("Unknown locale".to_string()));
        assert_eq!(err.to_string(), "Not found: Unknown locale");
    }
}
