//! Error types for the fetch, aggregate and render stages.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// A failure to obtain metadata for one package. Never carries partial data.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid package name {package:?}")]
    InvalidName { package: String },

    /// Connection refused, DNS failure, request timeout or a non-success status.
    #[error("could not fetch `{package}`'s package metadata: {cause}")]
    Network { package: String, cause: String },

    #[error("could not parse `{package}`'s package metadata: {cause}")]
    Decode { package: String, cause: String },
}

impl FetchError {
    /// Name of the package this error belongs to.
    pub fn package(&self) -> &str {
        match self {
            FetchError::InvalidName { package }
            | FetchError::Network { package, .. }
            | FetchError::Decode { package, .. } => package,
        }
    }
}

#[derive(Debug, Error)]
pub enum AggregationError {
    #[error("no packages to aggregate")]
    NoPackages,

    /// Fail-fast: the first per-package failure aborts the batch.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("deadline of {0:?} elapsed before all packages were fetched")]
    Timeout(Duration),

    #[error("metadata could not be fetched for any of the {requested} packages")]
    AllFailed { requested: usize },
}

#[derive(Debug, Error)]
pub enum RenderError {
    /// Template unreadable or malformed.
    #[error("template error: {0}")]
    Template(String),

    #[error("could not write {}: {cause}", path.display())]
    Sink { path: PathBuf, cause: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_package() {
        let err = FetchError::Network {
            package: "pkgplay".to_string(),
            cause: "connection refused".to_string(),
        };
        assert_eq!(err.package(), "pkgplay");
        assert!(err.to_string().contains("`pkgplay`"));
        assert!(err.to_string().contains("connection refused"));

        let err = FetchError::Decode {
            package: "await-fn".to_string(),
            cause: "expected value".to_string(),
        };
        assert_eq!(err.package(), "await-fn");
        assert!(err.to_string().contains("parse"));
    }

    #[test]
    fn test_aggregation_error_wraps_fetch_error() {
        let err: AggregationError = FetchError::InvalidName {
            package: String::new(),
        }
        .into();
        assert!(matches!(err, AggregationError::Fetch(_)));
        assert!(err.to_string().contains("invalid package name"));
    }

    #[test]
    fn test_render_error_display() {
        let err = RenderError::Sink {
            path: PathBuf::from("README.md"),
            cause: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("README.md"));
        assert!(err.to_string().contains("permission denied"));
    }
}
