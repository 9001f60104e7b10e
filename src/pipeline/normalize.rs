//! Response normalization - repair raw model output before validation.
//!
//! Generative output reliably appends explanatory text to enum-like answers
//! ("GILTI (Global Intangible Low-Taxed Income)") and wraps JSON in markdown
//! fences. This stage strips the fencing, parses into a loosely-typed
//! [`RawAlert`], and maps near-miss enum strings back to canonical values.
//! Anything it cannot repair is left untouched for the validator to reject -
//! normalization never invents data.

use serde::Deserialize;
use tracing::debug;

use crate::error::{ExtractionError, Result};
use crate::types::alert::{Country, RiskLevel, TaxType};

/// Loosely-typed model output, before validation.
///
/// Every field is optional and enum-like fields are plain strings; the
/// schema validator converts this into the strict
/// [`TaxAlert`](crate::types::alert::TaxAlert) or rejects it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAlert {
    #[serde(default)]
    pub classification: RawClassification,
    #[serde(default)]
    pub content: RawContent,
    #[serde(default)]
    pub interpretation: RawInterpretation,
    #[serde(default)]
    pub confidence: RawConfidence,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassification {
    pub country: Option<String>,
    pub tax_type: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    pub title: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub key_changes: Vec<String>,
    #[serde(default)]
    pub affected_entities: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInterpretation {
    pub domain_specific_impact: Option<String>,
    #[serde(default)]
    pub required_actions: Vec<String>,
    pub compliance_risk: Option<String>,
    pub estimated_deadline: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfidence {
    pub overall_score: Option<f64>,
    pub classification_confidence: Option<f64>,
    pub interpretation_confidence: Option<f64>,
    pub notes: Option<String>,
}

/// Parse raw model text into a [`RawAlert`], stripping optional markdown
/// code fences first.
///
/// Fence stripping is a no-op on the parsed result: fenced and unfenced
/// renditions of the same JSON yield the same object.
pub fn parse_response(raw: &str) -> Result<RawAlert> {
    serde_json::from_str(raw.trim())
        .or_else(|_| {
            let json_str = raw
                .trim()
                .trim_start_matches("```json")
                .trim_start_matches("```")
                .trim_end_matches("```")
                .trim();
            serde_json::from_str(json_str)
        })
        .map_err(|e| ExtractionError::Parse {
            message: e.to_string(),
            snippet: raw.chars().take(200).collect(),
        })
}

/// Repair rule for one enum field: an ordered canonical list plus an
/// optional catch-all used only on the parenthetical path.
///
/// The list order is first-match-wins and therefore part of the observable
/// behavior; it must not depend on map iteration order.
#[derive(Debug, Clone, Copy)]
pub struct EnumRepair {
    pub canonical: &'static [&'static str],
    pub parenthetical_fallback: Option<&'static str>,
}

/// Repair rule for `classification.country`.
pub const COUNTRY_REPAIR: EnumRepair = EnumRepair {
    canonical: Country::CANONICAL,
    parenthetical_fallback: None,
};

/// Repair rule for `classification.tax_type`. "Other" is the designated
/// catch-all when a parenthetical value cannot be matched.
pub const TAX_TYPE_REPAIR: EnumRepair = EnumRepair {
    canonical: TaxType::CANONICAL,
    parenthetical_fallback: Some("Other"),
};

/// Repair rule for `classification.priority` and
/// `interpretation.compliance_risk`.
pub const RISK_REPAIR: EnumRepair = EnumRepair {
    canonical: RiskLevel::CANONICAL,
    parenthetical_fallback: None,
};

impl EnumRepair {
    /// Map a raw string onto a canonical value where possible.
    ///
    /// 1. An exact canonical value is kept as-is.
    /// 2. Otherwise the first canonical value that is a case-insensitive
    ///    substring of the raw string wins.
    /// 3. If the raw string contains a parenthesis, the text before the
    ///    first `(` is retried against step 2; failing that, the designated
    ///    catch-all applies where one exists.
    /// 4. Anything still unmatched is returned unchanged so the validator
    ///    rejects it - never silently defaulted.
    pub fn apply(&self, raw: &str) -> String {
        let trimmed = raw.trim();

        if self.canonical.contains(&trimmed) {
            return trimmed.to_string();
        }

        if let Some(canonical) = self.substring_match(trimmed) {
            return canonical.to_string();
        }

        if trimmed.contains('(') {
            let base = trimmed.split('(').next().unwrap_or("").trim();
            if let Some(canonical) = self.substring_match(base) {
                return canonical.to_string();
            }
            if let Some(fallback) = self.parenthetical_fallback {
                return fallback.to_string();
            }
        }

        trimmed.to_string()
    }

    fn substring_match(&self, raw: &str) -> Option<&'static str> {
        let lower = raw.to_lowercase();
        self.canonical
            .iter()
            .copied()
            .find(|canonical| lower.contains(&canonical.to_lowercase()))
    }
}

/// Repair every enum-like field of a [`RawAlert`] in place.
pub fn repair_enums(alert: &mut RawAlert) {
    repair_field(&mut alert.classification.country, COUNTRY_REPAIR, "classification.country");
    repair_field(&mut alert.classification.tax_type, TAX_TYPE_REPAIR, "classification.tax_type");
    repair_field(&mut alert.classification.priority, RISK_REPAIR, "classification.priority");
    repair_field(
        &mut alert.interpretation.compliance_risk,
        RISK_REPAIR,
        "interpretation.compliance_risk",
    );
}

fn repair_field(value: &mut Option<String>, repair: EnumRepair, field: &str) {
    if let Some(raw) = value.as_deref() {
        let repaired = repair.apply(raw);
        if repaired != raw {
            debug!(field, from = raw, to = %repaired, "repaired enum value");
            *value = Some(repaired);
        }
    }
}
