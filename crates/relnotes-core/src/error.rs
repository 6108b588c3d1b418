//! Core error types.

use thiserror::Error;

/// Core-related errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unrecognized operating mode.
    #[error("invalid mode \"{0}\": must be one of PR, COMMIT, HYBRID")]
    InvalidMode(String),

    /// The tag range could not be determined.
    #[error("range error: {0}")]
    Range(#[from] RangeError),

    /// A repository query failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] relnotes_forge::ForgeError),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Reasons a tag range cannot be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    /// No to-tag was given and the current reference is not a tag.
    #[error("ambiguous to-tag: could not determine the current tag from ref \"{0}\"; provide a to-tag")]
    AmbiguousToTag(String),

    /// The to-tag is missing from the repository's tag list.
    #[error("tag not found: \"{0}\" is not in the repository's tag list")]
    TagNotFound(String),

    /// The to-tag is the oldest tag, so nothing precedes it.
    #[error("no previous tag: \"{0}\" appears to be the first tag")]
    NoPreviousTag(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_display() {
        let err = CoreError::InvalidMode("FULL".to_string());
        assert_eq!(
            err.to_string(),
            "invalid mode \"FULL\": must be one of PR, COMMIT, HYBRID"
        );
    }

    #[test]
    fn test_range_display() {
        let err = CoreError::from(RangeError::NoPreviousTag("v0.1.0".to_string()));
        assert_eq!(
            err.to_string(),
            "range error: no previous tag: \"v0.1.0\" appears to be the first tag"
        );
    }

    #[test]
    fn test_ambiguous_display() {
        let err = RangeError::AmbiguousToTag("refs/heads/main".to_string());
        assert!(err.to_string().starts_with("ambiguous to-tag"));
        assert!(err.to_string().contains("refs/heads/main"));
    }

    #[test]
    fn test_fetch_display() {
        let err = CoreError::from(relnotes_forge::ForgeError::RateLimited);
        assert_eq!(err.to_string(), "fetch error: rate limited");
    }
}
