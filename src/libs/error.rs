//! Typed errors for the storage and AI boundaries.
//!
//! Commands work with `anyhow::Result`; the layers below them return these
//! enums so callers can tell an expired identity from a rejected record or
//! a failing disk, and decide whether a retry makes sense.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors produced by the per-user stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No authenticated user identity is available.
    #[error("Session expired. Run `lifeos login <user-id>` to sign in again")]
    Auth,

    /// The record was rejected before reaching the database.
    #[error("Invalid record: {0}")]
    Validation(String),

    /// The row does not exist or belongs to another user.
    #[error("{0} with ID {1} not found")]
    NotFound(&'static str, i64),

    /// The database refused or failed the operation.
    #[error("Database error: {0}")]
    Persistence(#[from] rusqlite::Error),
}

impl StoreError {
    /// Only persistence failures may succeed on a later attempt; constraint
    /// violations fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            StoreError::Persistence(rusqlite::Error::SqliteFailure(e, _)) => e.code != ErrorCode::ConstraintViolation,
            StoreError::Persistence(_) => true,
            _ => false,
        }
    }

    /// True for a write rejected because the referenced user row is missing.
    pub fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
        matches!(
            error,
            rusqlite::Error::SqliteFailure(e, _) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
        )
    }

    pub fn validation(reason: impl Into<String>) -> Self {
        StoreError::Validation(reason.into())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Errors produced while talking to the completion API.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No API key configured. Set OPENAI_API_KEY or run `lifeos init`")]
    MissingApiKey,

    #[error("Completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion API responded with status {0}")]
    Status(u16),

    #[error("Completion API returned no choices")]
    EmptyResponse,

    #[error("Completion content is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}
