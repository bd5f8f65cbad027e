use std::fmt;

use crate::pages::PageId;

/// Errors produced by the content store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No content row exists for the page and the page is configured to
    /// surface absence instead of answering with defaults.
    #[error("No content found for page '{page}'")]
    NotFound { page: PageId },

    /// A caller-supplied view or record is malformed. Raised before any
    /// persistence call is made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A persistence call failed. Never retried by the store.
    #[error("Persistence {op} failed for page '{page}': {message}")]
    Persistence {
        page: PageId,
        op: StoreOp,
        message: String,
    },
}

impl StoreError {
    /// Attach the section being served to a persistence error's message.
    ///
    /// Leaves other variants untouched.
    pub fn with_section(self, section: &str) -> Self {
        match self {
            StoreError::Persistence { page, op, message } => StoreError::Persistence {
                page,
                op,
                message: format!("section '{section}': {message}"),
            },
            other => other,
        }
    }
}

/// Which half of a persistence round trip failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Read,
    Write,
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreOp::Read => write!(f, "read"),
            StoreOp::Write => write!(f, "write"),
        }
    }
}
