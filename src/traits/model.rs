//! ChatModel trait for generative-text providers.
//!
//! The pipeline needs exactly one capability from a model: run a system +
//! user prompt pair and hand back raw text. Implementations wrap specific
//! providers and handle transport details; they do not parse or retry.

use async_trait::async_trait;

use crate::error::Result;

/// A generative-text completion service.
///
/// Implementations must use deterministic-leaning sampling (low
/// temperature) so repeated extraction of identical input stays
/// reproducible. Transport failures surface as
/// [`ExtractionError::Upstream`](crate::error::ExtractionError::Upstream);
/// retry policy belongs to the caller.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Run one completion and return the raw response text.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;

    /// Model identifier, recorded in alert metadata.
    fn name(&self) -> &str;
}
