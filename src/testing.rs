//! Testing utilities including a mock model.
//!
//! Useful for testing the pipeline (and applications built on it) without
//! making real LLM calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractionError, Result};
use crate::traits::model::ChatModel;

/// A mock ChatModel with deterministic, configurable responses.
///
/// Responses can be keyed on substrings of the user prompt (which embeds
/// the document text), so a batch can mix successes and failures. Every
/// call is recorded for assertions.
#[derive(Default)]
pub struct MockModel {
    /// (needle, response) pairs checked in insertion order against the
    /// user prompt.
    canned: Arc<RwLock<Vec<(String, String)>>>,

    /// Needles that trigger an upstream failure.
    failures: Arc<RwLock<Vec<String>>>,

    /// Fallback response when nothing matches.
    default_response: Arc<RwLock<Option<String>>>,

    /// Recorded user prompts, one per call.
    calls: Arc<RwLock<Vec<String>>>,

    name: String,
}

impl MockModel {
    /// Create a mock that answers every call with a valid sample alert.
    pub fn new() -> Self {
        Self {
            name: "mock-model".to_string(),
            ..Default::default()
        }
    }

    /// Set the reported model name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the fallback response for all otherwise-unmatched calls.
    pub fn with_response(self, response: impl Into<String>) -> Self {
        *self.default_response.write().unwrap() = Some(response.into());
        self
    }

    /// Return `response` when the user prompt contains `needle`.
    pub fn respond_when(self, needle: impl Into<String>, response: impl Into<String>) -> Self {
        self.canned
            .write()
            .unwrap()
            .push((needle.into(), response.into()));
        self
    }

    /// Fail with an upstream error when the user prompt contains `needle`.
    pub fn fail_when(self, needle: impl Into<String>) -> Self {
        self.failures.write().unwrap().push(needle.into());
        self
    }

    /// Number of completions requested so far.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// User prompts received, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl ChatModel for MockModel {
    async fn complete(&self, _system: &str, user: &str) -> Result<String> {
        self.calls.write().unwrap().push(user.to_string());

        if let Some(needle) = self
            .failures
            .read()
            .unwrap()
            .iter()
            .find(|n| user.contains(n.as_str()))
        {
            return Err(ExtractionError::Upstream {
                status: Some(500),
                message: format!("mock failure triggered by {needle:?}"),
            });
        }

        if let Some((_, response)) = self
            .canned
            .read()
            .unwrap()
            .iter()
            .find(|(needle, _)| user.contains(needle.as_str()))
        {
            return Ok(response.clone());
        }

        Ok(self
            .default_response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(sample_alert_json))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A sample US GILTI notice, long enough to pass the input gate.
pub fn sample_notice_text() -> &'static str {
    "IRS Notice 2024-45: the Internal Revenue Service announces changes to the \
     GILTI computation under IRC § 951A for tax years beginning after December 31, \
     2024. Controlled foreign corporation inclusion percentages are revised and \
     transition relief is provided for fiscal-year taxpayers."
}

/// A valid model payload as a JSON value, for tests that mutate fields.
pub fn sample_alert_value() -> serde_json::Value {
    serde_json::json!({
        "classification": {
            "country": "US",
            "tax_type": "GILTI",
            "priority": "HIGH"
        },
        "content": {
            "title": "IRS revises GILTI computation rules",
            "summary": "The IRS issued Notice 2024-45 revising the GILTI computation \
                        rules for controlled foreign corporations, effective for tax \
                        years beginning after 2024, with transition relief.",
            "key_changes": [
                "Revised CFC inclusion percentages",
                "Transition relief for fiscal-year taxpayers"
            ],
            "affected_entities": ["US multinationals with CFCs", "Energy companies"]
        },
        "interpretation": {
            "domain_specific_impact": "The revised inclusion rules increase the \
                        effective US tax on foreign upstream earnings and require \
                        remodeling of the group's GILTI position before year end.",
            "required_actions": [
                "Remodel GILTI position for FY2025",
                "Brief the tax provision team"
            ],
            "compliance_risk": "MEDIUM",
            "estimated_deadline": "2025-01-01"
        },
        "confidence": {
            "overall_score": 0.92,
            "classification_confidence": 0.95,
            "interpretation_confidence": 0.89,
            "notes": "Deadline taken from the stated effective date."
        }
    })
}

/// A valid model payload as a JSON string.
pub fn sample_alert_json() -> String {
    sample_alert_value().to_string()
}
