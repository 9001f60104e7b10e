//! Extraction orchestrator - drives single and batch extraction through the
//! full pipeline and applies the confidence gate.
//!
//! Stage order for one call: input length check, jurisdiction detection,
//! prompt construction, model call, normalization, metadata injection,
//! schema validation, confidence check. Any stage failure surfaces
//! immediately; no stage is retried within one call.

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{ExtractionError, Result};
use crate::jurisdiction::JurisdictionTable;
use crate::pipeline::normalize::{parse_response, repair_enums};
use crate::pipeline::prompts::build_prompt;
use crate::pipeline::validate::validate;
use crate::traits::model::ChatModel;
use crate::types::alert::{Country, Metadata, TaxAlert};

/// Minimum input length, in characters, before the model is consulted.
pub const MIN_INPUT_CHARS: usize = 50;

/// Options for one extraction call (or every item of a batch).
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Minimum confidence threshold. Advisory: a record scoring below it is
    /// still returned, annotated with a warning for manual review.
    pub min_confidence: f64,

    /// Caller-supplied reference to the source document, carried into logs
    /// and warnings.
    pub source_ref: Option<String>,
}

impl ExtractOptions {
    /// Create options with no threshold and no source reference.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum confidence threshold.
    pub fn with_min_confidence(mut self, min_confidence: f64) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Set the source document reference.
    pub fn with_source_ref(mut self, source_ref: impl Into<String>) -> Self {
        self.source_ref = Some(source_ref.into());
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.0,
            source_ref: None,
        }
    }
}

/// Result of one successful extraction.
#[derive(Debug, Clone)]
pub struct ExtractionOutcome {
    /// The validated alert.
    pub alert: TaxAlert,

    /// Document reference found by the detected jurisdiction's patterns,
    /// e.g. "Notice 2024-45".
    pub document_reference: Option<String>,

    /// Country of the detected jurisdiction (advisory; may disagree with
    /// the model's classification).
    pub detected_country: Country,

    /// Advisory warnings: below-threshold confidence, jurisdiction
    /// mismatch. Never fatal.
    pub warnings: Vec<String>,
}

/// Aggregate result of a batch extraction.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Per-item results, in input order. One item's failure never discards
    /// another's result.
    pub results: Vec<Result<ExtractionOutcome>>,

    /// Number of items that produced a validated alert.
    pub succeeded: usize,

    /// Number of items that failed.
    pub failed: usize,
}

impl BatchOutcome {
    /// True when every item succeeded.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// The extraction pipeline, generic over the model seam.
///
/// Holds no per-call state: each extraction is a pure function of its input
/// text, the static jurisdiction table, and the model response. Construct
/// with a mock model for deterministic tests.
pub struct Extractor<M: ChatModel> {
    model: M,
    jurisdictions: JurisdictionTable,
}

impl<M: ChatModel> Extractor<M> {
    /// Create an extractor over the built-in jurisdiction table.
    pub fn new(model: M) -> Self {
        Self {
            model,
            jurisdictions: JurisdictionTable::builtin(),
        }
    }

    /// Replace the jurisdiction table.
    pub fn with_jurisdictions(mut self, jurisdictions: JurisdictionTable) -> Self {
        self.jurisdictions = jurisdictions;
        self
    }

    /// The underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Extract a validated tax alert from one document.
    pub async fn extract(
        &self,
        text: &str,
        options: &ExtractOptions,
    ) -> Result<ExtractionOutcome> {
        let length = text.trim().chars().count();
        if length < MIN_INPUT_CHARS {
            return Err(ExtractionError::InputTooShort {
                length,
                minimum: MIN_INPUT_CHARS,
            });
        }

        let context = self.jurisdictions.detect(text);
        let document_reference = context.extract_document_reference(text);
        info!(
            jurisdiction = %context.country,
            document_reference = document_reference.as_deref(),
            source_ref = options.source_ref.as_deref(),
            text_length = length,
            "starting extraction"
        );

        let prompt = build_prompt(context);
        let response = self.model.complete(&prompt.system, &prompt.user(text)).await?;

        let mut raw = parse_response(&response)?;
        repair_enums(&mut raw);

        let metadata = Metadata {
            extracted_at: Utc::now(),
            source_length: text.chars().count(),
            model_used: self.model.name().to_string(),
        };
        let alert = validate(raw, metadata)?;

        let mut warnings = Vec::new();

        let score = alert.confidence.overall_score;
        if score < options.min_confidence {
            let warning = format!(
                "confidence {:.1}% below threshold {:.1}%",
                score * 100.0,
                options.min_confidence * 100.0
            );
            warn!(
                source_ref = options.source_ref.as_deref(),
                %warning,
                "low-confidence extraction returned for manual review"
            );
            warnings.push(warning);
        }

        if !context.matches_country(alert.classification.country) {
            let warning = format!(
                "classified country {} disagrees with detected jurisdiction {}",
                alert.classification.country, context.country
            );
            warn!(source_ref = options.source_ref.as_deref(), %warning, "jurisdiction mismatch");
            warnings.push(warning);
        }

        info!(
            country = %alert.classification.country,
            priority = %alert.classification.priority,
            confidence = score,
            "extraction complete"
        );

        Ok(ExtractionOutcome {
            alert,
            document_reference,
            detected_country: context.country,
            warnings,
        })
    }

    /// Extract alerts from multiple documents, sequentially.
    ///
    /// Items fail independently: one item's error is recorded in its slot
    /// and processing continues.
    pub async fn extract_batch(&self, texts: &[String], options: &ExtractOptions) -> BatchOutcome {
        info!(count = texts.len(), "starting batch extraction");

        let mut results = Vec::with_capacity(texts.len());
        let mut succeeded = 0;
        let mut failed = 0;

        for (index, text) in texts.iter().enumerate() {
            match self.extract(text, options).await {
                Ok(outcome) => {
                    succeeded += 1;
                    results.push(Ok(outcome));
                }
                Err(error) => {
                    failed += 1;
                    warn!(index, %error, "batch item failed");
                    results.push(Err(error));
                }
            }
        }

        info!(
            total = texts.len(),
            succeeded, failed, "batch extraction complete"
        );

        BatchOutcome {
            results,
            succeeded,
            failed,
        }
    }
}
