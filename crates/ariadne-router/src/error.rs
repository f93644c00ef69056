//! Route resolution errors.

use thiserror::Error;

/// Errors returned by [`Register::find`](crate::Register::find).
///
/// [`RouteError::NotFound`] is the expected outcome of a miss and should be
/// answered with the not-found handler. Any other variant is an internal
/// failure and must not be treated as a miss.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouteError {
    /// No registered pattern matches the path.
    #[error("entry not found")]
    NotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(RouteError::NotFound.to_string(), "entry not found");
    }
}
