//! The validated tax alert record and its closed enum vocabularies.
//!
//! These types exist only on the far side of schema validation: an instance
//! of [`TaxAlert`] always satisfies every structural constraint (enum
//! membership, length bounds, confidence ranges), so downstream code never
//! re-checks them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Country / jurisdiction of a tax notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Us,
    Uk,
    Eu,
    Other,
}

impl Country {
    /// Canonical wire values, in repair-priority order.
    pub const CANONICAL: &'static [&'static str] = &["US", "UK", "EU", "OTHER"];

    /// Parse an exact canonical value.
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "US" => Some(Self::Us),
            "UK" => Some(Self::Uk),
            "EU" => Some(Self::Eu),
            "OTHER" => Some(Self::Other),
            _ => None,
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Us => "US",
            Self::Uk => "UK",
            Self::Eu => "EU",
            Self::Other => "OTHER",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of tax regulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaxType {
    #[serde(rename = "Corporate Tax")]
    CorporateTax,
    #[serde(rename = "VAT")]
    Vat,
    #[serde(rename = "Transfer Pricing")]
    TransferPricing,
    #[serde(rename = "GILTI")]
    Gilti,
    #[serde(rename = "Sales Tax")]
    SalesTax,
    #[serde(rename = "Energy Tax")]
    EnergyTax,
    #[serde(rename = "Withholding Tax")]
    WithholdingTax,
    #[serde(rename = "Customs Duty")]
    CustomsDuty,
    Other,
}

impl TaxType {
    /// Canonical wire values, in repair-priority order.
    ///
    /// Repair scans this list first-match-wins, so the order is part of the
    /// behavior and must stay fixed.
    pub const CANONICAL: &'static [&'static str] = &[
        "Corporate Tax",
        "VAT",
        "Transfer Pricing",
        "GILTI",
        "Sales Tax",
        "Energy Tax",
        "Withholding Tax",
        "Customs Duty",
        "Other",
    ];

    /// Parse an exact canonical value.
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "Corporate Tax" => Some(Self::CorporateTax),
            "VAT" => Some(Self::Vat),
            "Transfer Pricing" => Some(Self::TransferPricing),
            "GILTI" => Some(Self::Gilti),
            "Sales Tax" => Some(Self::SalesTax),
            "Energy Tax" => Some(Self::EnergyTax),
            "Withholding Tax" => Some(Self::WithholdingTax),
            "Customs Duty" => Some(Self::CustomsDuty),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CorporateTax => "Corporate Tax",
            Self::Vat => "VAT",
            Self::TransferPricing => "Transfer Pricing",
            Self::Gilti => "GILTI",
            Self::SalesTax => "Sales Tax",
            Self::EnergyTax => "Energy Tax",
            Self::WithholdingTax => "Withholding Tax",
            Self::CustomsDuty => "Customs Duty",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for TaxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity scale shared by `priority` and `compliance_risk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Canonical wire values, in repair-priority order.
    pub const CANONICAL: &'static [&'static str] = &["CRITICAL", "HIGH", "MEDIUM", "LOW"];

    /// Parse an exact canonical value.
    pub fn from_canonical(value: &str) -> Option<Self> {
        match value {
            "CRITICAL" => Some(Self::Critical),
            "HIGH" => Some(Self::High),
            "MEDIUM" => Some(Self::Medium),
            "LOW" => Some(Self::Low),
            _ => None,
        }
    }

    /// The canonical wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated tax alert - the canonical unit produced by the pipeline.
///
/// Created once per extraction call and immutable thereafter. Ownership
/// passes to whichever caller persists it; the pipeline holds no state
/// across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxAlert {
    pub classification: Classification,
    pub content: AlertContent,
    pub interpretation: Interpretation,
    pub confidence: Confidence,
    pub metadata: Metadata,
}

/// How the notification is classified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub country: Country,
    pub tax_type: TaxType,
    pub priority: RiskLevel,
}

/// What the notification says.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertContent {
    /// Concise title, 5-200 chars.
    pub title: String,

    /// 2-3 sentence summary, 50-500 chars.
    pub summary: String,

    /// Key regulatory changes, 1-10 entries.
    pub key_changes: Vec<String>,

    /// Entity types affected, 1-15 entries.
    pub affected_entities: Vec<String>,
}

/// Domain-specific interpretation of the notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interpretation {
    /// Impact analysis for the client organization, 50-800 chars.
    pub domain_specific_impact: String,

    /// Concrete action items, 1-10 entries.
    pub required_actions: Vec<String>,

    /// Risk level if not addressed.
    pub compliance_risk: RiskLevel,

    /// Compliance deadline: ISO date or descriptive ("Q1 2025"), if any.
    pub estimated_deadline: Option<String>,
}

/// Model-reported confidence scores, each within `[0, 1]`.
///
/// A self-estimate of extraction reliability, not independently verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Confidence {
    pub overall_score: f64,
    pub classification_confidence: f64,
    pub interpretation_confidence: f64,

    /// Caveats or uncertainty notes, if the model supplied any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Extraction provenance, injected by the orchestrator - never produced by
/// the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// When the extraction ran.
    pub extracted_at: DateTime<Utc>,

    /// Character count of the input text.
    pub source_length: usize,

    /// Model identifier that produced the record.
    pub model_used: String,
}
