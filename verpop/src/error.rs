use thiserror::Error;

/// Message shown when the search box is submitted empty.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a package name";

/// Message used when a fetch failure carries no text of its own.
pub const GENERIC_FETCH_MESSAGE: &str = "Failed to fetch package info";

/// A registry or network failure, carrying a user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn not_found(package_name: &str) -> Self {
        Self::new(format!("Package '{}' not found", package_name))
    }

    pub fn for_package(package_name: &str) -> Self {
        Self::new(format!("Failed to fetch package info for {}", package_name))
    }

    /// The message to display, falling back to a generic one when empty.
    pub fn display_message(&self) -> String {
        if self.message.trim().is_empty() {
            GENERIC_FETCH_MESSAGE.to_string()
        } else {
            self.message.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("{}", EMPTY_QUERY_MESSAGE)]
    EmptyQuery,
    #[error("{}", .0.display_message())]
    Fetch(#[from] FetchError),
}

/// A version range expression that the semver evaluator rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid version range `{range}`: {reason}")]
pub struct RangeError {
    pub range: String,
    pub reason: String,
}

impl RangeError {
    pub fn new(range: &str, reason: impl ToString) -> Self {
        Self {
            range: range.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_error_messages() {
        assert_eq!(SearchError::EmptyQuery.to_string(), "Please enter a package name");

        let err = SearchError::from(FetchError::new("boom"));
        assert_eq!(err.to_string(), "boom");

        let err = SearchError::from(FetchError::new("  "));
        assert_eq!(err.to_string(), "Failed to fetch package info");
    }

    #[test]
    fn test_fetch_error_constructors() {
        assert_eq!(
            FetchError::not_found("left-pad").to_string(),
            "Package 'left-pad' not found"
        );
        assert_eq!(
            FetchError::for_package("react").to_string(),
            "Failed to fetch package info for react"
        );
    }
}
