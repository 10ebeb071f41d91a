use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type returned by the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Validation failed for one or more fields.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The backing file exists but does not hold a valid blog document.
    #[error("corrupt data in {}: {message}", .path.display())]
    CorruptData { path: PathBuf, message: String },

    /// Reading, writing, or copying a file failed.
    #[error("i/o failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The referenced post, user, or notification does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// The document could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn post_not_found(id: u64) -> Self {
        Self::NotFound { entity: "post", id }
    }

    pub(crate) fn user_not_found(id: u64) -> Self {
        Self::NotFound { entity: "user", id }
    }

    /// True for the condition the presentation layer may silently ignore.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Collection of validation issues encountered while preparing a mutation.
#[derive(Debug, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    /// Convenience helper for constructing a single-field validation error.
    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns `true` if any issue carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

/// Detailed validation failure for a single field.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
