//! Typed errors for the extraction pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each variant maps to one
//! pipeline stage so callers can decide what is retryable.

use thiserror::Error;

/// Errors that can occur during tax alert extraction.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// Input text below the minimum length; never reaches the model.
    #[error("input too short: {length} chars, minimum {minimum} required")]
    InputTooShort { length: usize, minimum: usize },

    /// Model provider failure (network, auth, rate limit).
    ///
    /// Propagated as-is with the provider status where available. Retry
    /// policy belongs to the caller, not this library.
    #[error("upstream model error: {message}")]
    Upstream {
        /// HTTP status from the provider, if the request got that far.
        status: Option<u16>,
        message: String,
    },

    /// Model response contained no parsable JSON object.
    #[error("failed to parse model response: {message}")]
    Parse {
        message: String,
        /// Leading slice of the raw response, for diagnostics.
        snippet: String,
    },

    /// Normalized object failed structural validation.
    ///
    /// Carries the dotted field path and the constraint violated. A single
    /// violating field invalidates the whole record.
    #[error("schema validation failed at {field}: {reason}")]
    Schema { field: String, reason: String },

    /// Configuration error (missing API key, etc.).
    #[error("config error: {0}")]
    Config(String),
}

impl ExtractionError {
    /// Build a schema error for a dotted field path.
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Schema {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for failures a caller may reasonably retry with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
