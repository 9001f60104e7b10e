//! Live model clients and one-shot convenience entry points.

pub mod anthropic;

pub use anthropic::{AnthropicModel, DEFAULT_MODEL};

use crate::error::Result;
use crate::pipeline::extract::{ExtractOptions, Extractor};
use crate::types::alert::TaxAlert;

/// Options for the one-shot [`extract_tax_alert`] entry point.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// API key override; falls back to `ANTHROPIC_API_KEY`.
    pub api_key: Option<String>,

    /// Model override; falls back to [`DEFAULT_MODEL`].
    pub model: Option<String>,
}

impl ClientOptions {
    /// Create empty options (environment key, default model).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Quick extraction for simple use cases: build a live client, run the full
/// pipeline once, and return the validated alert.
///
/// Fails on input shorter than 50 characters, upstream call failure,
/// unparsable response, or schema violation.
pub async fn extract_tax_alert(text: &str, options: ClientOptions) -> Result<TaxAlert> {
    let mut model = match options.api_key {
        Some(api_key) => AnthropicModel::new(api_key),
        None => AnthropicModel::from_env()?,
    };
    if let Some(name) = options.model {
        model = model.with_model(name);
    }

    let extractor = Extractor::new(model);
    let outcome = extractor.extract(text, &ExtractOptions::default()).await?;
    Ok(outcome.alert)
}
