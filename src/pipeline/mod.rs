//! Extraction pipeline - the core of the library.
//!
//! The pipeline turns unstructured tax-notice text into a validated
//! [`TaxAlert`](crate::types::alert::TaxAlert):
//! - Prompt construction with jurisdiction hints
//! - Model invocation through the [`ChatModel`](crate::traits::ChatModel) seam
//! - Response normalization (fence stripping, enum repair)
//! - All-or-nothing schema validation
//! - Confidence gating and batch orchestration

pub mod extract;
pub mod normalize;
pub mod prompts;
pub mod validate;

pub use extract::{
    BatchOutcome, ExtractOptions, ExtractionOutcome, Extractor, MIN_INPUT_CHARS,
};
pub use normalize::{
    parse_response, repair_enums, EnumRepair, RawAlert, COUNTRY_REPAIR, RISK_REPAIR,
    TAX_TYPE_REPAIR,
};
pub use prompts::{build_prompt, ExtractionPrompt, SYSTEM_PROMPT};
pub use validate::validate;
