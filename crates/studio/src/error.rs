//! Error types for catalog lookups and session operations.
//!
//! Only two things can go wrong inside the engine, and both are caller or
//! catalog defects rather than environmental conditions. Clipboard and
//! share failures are absorbed where they happen (see
//! [`platform`](crate::platform)) and never show up here.

use thiserror::Error;

use crate::catalog::Filter;

/// Errors returned by [`Catalog`](crate::catalog::Catalog) and
/// [`SessionController`](crate::session::SessionController).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudioError {
    /// The filter name is neither `all` nor a category of the catalog.
    #[error("invalid filter '{0}': expected 'all' or a known category")]
    InvalidFilter(String),
    /// The selected filter resolved to a pool with no prompts.
    #[error("no prompts available for filter '{0}'")]
    EmptyPool(Filter),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StudioError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    #[test]
    fn messages_name_the_filter() {
        let err = StudioError::InvalidFilter("brutalist".into());
        assert!(err.to_string().contains("'brutalist'"));

        let err = StudioError::EmptyPool(Filter::Category(Category::Minimalist));
        assert_eq!(
            err.to_string(),
            "no prompts available for filter 'minimalist'"
        );
    }
}
