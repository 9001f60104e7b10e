//! Tax Alert Extraction Library
//!
//! An AI extraction-normalization-validation pipeline for tax-regulatory
//! notices: detect the likely jurisdiction, prompt a generative model with
//! strict output constraints, repair the near-miss output it reliably
//! produces, and validate the result against a closed schema before anyone
//! downstream sees it.
//!
//! # Design Philosophy
//!
//! **Normalize generously, validate ruthlessly.**
//!
//! - Models append explanatory text to enum answers; the normalizer maps
//!   those back to canonical values with an explicit, ordered repair table
//! - Validation is all-or-nothing: one violating field fails the record,
//!   and nothing is ever silently defaulted
//! - Confidence is a signal for manual review, not a correctness gate
//! - Every collaborator (the model, persistence) is injected at a trait
//!   seam, so the whole pipeline tests deterministically with a mock
//!
//! # Usage
//!
//! ```rust,ignore
//! use tax_alert_extraction::{ExtractOptions, Extractor, AnthropicModel};
//!
//! let model = AnthropicModel::from_env()?;
//! let extractor = Extractor::new(model);
//!
//! let outcome = extractor
//!     .extract(&notice_text, &ExtractOptions::new().with_min_confidence(0.7))
//!     .await?;
//!
//! println!(
//!     "{} / {} ({})",
//!     outcome.alert.classification.country,
//!     outcome.alert.classification.tax_type,
//!     outcome.alert.confidence.overall_score,
//! );
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (ChatModel)
//! - [`types`] - The validated TaxAlert record and enum vocabularies
//! - [`jurisdiction`] - Jurisdiction profiles and detection
//! - [`pipeline`] - Prompts, normalization, validation, orchestration
//! - [`ai`] - Live Anthropic client and one-shot entry points
//! - [`security`] - Credential handling
//! - [`testing`] - Mock model for deterministic tests

pub mod ai;
pub mod error;
pub mod jurisdiction;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractionError, Result};
pub use traits::ChatModel;
pub use types::{
    AlertContent, Classification, Confidence, Country, Interpretation, Metadata, RiskLevel,
    TaxAlert, TaxType,
};

// Re-export the jurisdiction layer
pub use jurisdiction::{
    eu_context, uk_hmrc_context, us_irs_context, JurisdictionContext, JurisdictionTable,
};

// Re-export pipeline components
pub use pipeline::{
    build_prompt, parse_response, repair_enums, validate, BatchOutcome, ExtractOptions,
    ExtractionOutcome, ExtractionPrompt, Extractor, RawAlert, MIN_INPUT_CHARS,
};

// Re-export the live client
pub use ai::{extract_tax_alert, AnthropicModel, ClientOptions, DEFAULT_MODEL};

// Re-export security and testing utilities
pub use security::SecretString;
pub use testing::MockModel;
