//! Schema validation - the all-or-nothing gate between loose model output
//! and the strict [`TaxAlert`] type.
//!
//! A single violating field invalidates the whole record; the pipeline
//! never substitutes defaults for a field that fails. Errors carry the
//! dotted field path and the constraint violated.

use crate::error::{ExtractionError, Result};
use crate::pipeline::normalize::RawAlert;
use crate::types::alert::{
    AlertContent, Classification, Confidence, Country, Interpretation, Metadata, RiskLevel,
    TaxAlert, TaxType,
};

/// Validate a normalized [`RawAlert`] into a [`TaxAlert`].
///
/// `metadata` is injected by the orchestrator immediately before this call;
/// it is never model-produced.
pub fn validate(raw: RawAlert, metadata: Metadata) -> Result<TaxAlert> {
    let classification = Classification {
        country: parse_enum(
            raw.classification.country,
            "classification.country",
            Country::from_canonical,
            Country::CANONICAL,
        )?,
        tax_type: parse_enum(
            raw.classification.tax_type,
            "classification.tax_type",
            TaxType::from_canonical,
            TaxType::CANONICAL,
        )?,
        priority: parse_enum(
            raw.classification.priority,
            "classification.priority",
            RiskLevel::from_canonical,
            RiskLevel::CANONICAL,
        )?,
    };

    let content = AlertContent {
        title: bounded_string(raw.content.title, "content.title", 5, 200)?,
        summary: bounded_string(raw.content.summary, "content.summary", 50, 500)?,
        key_changes: bounded_list(raw.content.key_changes, "content.key_changes", 1, 10)?,
        affected_entities: bounded_list(
            raw.content.affected_entities,
            "content.affected_entities",
            1,
            15,
        )?,
    };

    let interpretation = Interpretation {
        domain_specific_impact: bounded_string(
            raw.interpretation.domain_specific_impact,
            "interpretation.domain_specific_impact",
            50,
            800,
        )?,
        required_actions: bounded_list(
            raw.interpretation.required_actions,
            "interpretation.required_actions",
            1,
            10,
        )?,
        compliance_risk: parse_enum(
            raw.interpretation.compliance_risk,
            "interpretation.compliance_risk",
            RiskLevel::from_canonical,
            RiskLevel::CANONICAL,
        )?,
        estimated_deadline: raw.interpretation.estimated_deadline,
    };

    let confidence = Confidence {
        overall_score: unit_interval(raw.confidence.overall_score, "confidence.overall_score")?,
        classification_confidence: unit_interval(
            raw.confidence.classification_confidence,
            "confidence.classification_confidence",
        )?,
        interpretation_confidence: unit_interval(
            raw.confidence.interpretation_confidence,
            "confidence.interpretation_confidence",
        )?,
        notes: raw.confidence.notes,
    };

    Ok(TaxAlert {
        classification,
        content,
        interpretation,
        confidence,
        metadata,
    })
}

fn parse_enum<T>(
    value: Option<String>,
    field: &str,
    parse: fn(&str) -> Option<T>,
    allowed: &[&str],
) -> Result<T> {
    let value = value.ok_or_else(|| ExtractionError::schema(field, "missing required field"))?;
    parse(&value).ok_or_else(|| {
        ExtractionError::schema(
            field,
            format!("\"{value}\" is not one of {}", allowed.join(", ")),
        )
    })
}

fn bounded_string(value: Option<String>, field: &str, min: usize, max: usize) -> Result<String> {
    let value = value.ok_or_else(|| ExtractionError::schema(field, "missing required field"))?;
    let len = value.chars().count();
    if len < min {
        return Err(ExtractionError::schema(
            field,
            format!("{len} chars, minimum {min} required"),
        ));
    }
    if len > max {
        return Err(ExtractionError::schema(
            field,
            format!("{len} chars, maximum {max} allowed"),
        ));
    }
    Ok(value)
}

fn bounded_list(
    values: Vec<String>,
    field: &str,
    min: usize,
    max: usize,
) -> Result<Vec<String>> {
    if values.len() < min {
        return Err(ExtractionError::schema(
            field,
            format!("{} entries, minimum {min} required", values.len()),
        ));
    }
    if values.len() > max {
        return Err(ExtractionError::schema(
            field,
            format!("{} entries, maximum {max} allowed", values.len()),
        ));
    }
    Ok(values)
}

fn unit_interval(value: Option<f64>, field: &str) -> Result<f64> {
    let value = value.ok_or_else(|| ExtractionError::schema(field, "missing required field"))?;
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&value) {
        return Err(ExtractionError::schema(
            field,
            format!("{value} is outside [0, 1]"),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::normalize::parse_response;
    use chrono::Utc;

    fn metadata() -> Metadata {
        Metadata {
            extracted_at: Utc::now(),
            source_length: 1200,
            model_used: "test-model".to_string(),
        }
    }

    fn valid_raw() -> RawAlert {
        parse_response(
            r#"{
                "classification": { "country": "US", "tax_type": "GILTI", "priority": "HIGH" },
                "content": {
                    "title": "IRS adjusts GILTI computation",
                    "summary": "The IRS issued Notice 2024-45 revising the GILTI computation rules for controlled foreign corporations, effective for tax years beginning in 2025.",
                    "key_changes": ["Revised GILTI inclusion percentage"],
                    "affected_entities": ["US multinationals with CFCs"]
                },
                "interpretation": {
                    "domain_specific_impact": "The revised inclusion rules increase the effective US tax on foreign upstream earnings and require remodeling of the group's GILTI position.",
                    "required_actions": ["Remodel GILTI position for FY2025"],
                    "compliance_risk": "MEDIUM",
                    "estimated_deadline": "2025-01-01"
                },
                "confidence": {
                    "overall_score": 0.92,
                    "classification_confidence": 0.95,
                    "interpretation_confidence": 0.89,
                    "notes": "Deadline inferred from effective date."
                }
            }"#,
        )
        .unwrap()
    }

    fn field_of(err: ExtractionError) -> String {
        match err {
            ExtractionError::Schema { field, .. } => field,
            other => panic!("expected Schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_record_passes() {
        let alert = validate(valid_raw(), metadata()).unwrap();
        assert_eq!(alert.classification.country, Country::Us);
        assert_eq!(alert.classification.tax_type, TaxType::Gilti);
        assert_eq!(alert.interpretation.compliance_risk, RiskLevel::Medium);
        assert_eq!(alert.metadata.model_used, "test-model");
    }

    #[test]
    fn test_non_canonical_country_rejected() {
        let mut raw = valid_raw();
        raw.classification.country = Some("USA".to_string());
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "classification.country"
        );
    }

    #[test]
    fn test_missing_enum_field_rejected() {
        let mut raw = valid_raw();
        raw.classification.tax_type = None;
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "classification.tax_type"
        );
    }

    #[test]
    fn test_short_summary_rejected() {
        let mut raw = valid_raw();
        raw.content.summary = Some("Too short.".to_string());
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "content.summary"
        );
    }

    #[test]
    fn test_empty_key_changes_rejected() {
        let mut raw = valid_raw();
        raw.content.key_changes.clear();
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "content.key_changes"
        );
    }

    #[test]
    fn test_oversized_required_actions_rejected() {
        let mut raw = valid_raw();
        raw.interpretation.required_actions = vec!["act".to_string(); 11];
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "interpretation.required_actions"
        );
    }

    #[test]
    fn test_confidence_above_one_rejected() {
        let mut raw = valid_raw();
        raw.confidence.overall_score = Some(1.5);
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "confidence.overall_score"
        );
    }

    #[test]
    fn test_negative_confidence_rejected() {
        let mut raw = valid_raw();
        raw.confidence.classification_confidence = Some(-0.1);
        assert_eq!(
            field_of(validate(raw, metadata()).unwrap_err()),
            "confidence.classification_confidence"
        );
    }

    #[test]
    fn test_confidence_boundaries_accepted() {
        let mut raw = valid_raw();
        raw.confidence.overall_score = Some(0.0);
        raw.confidence.interpretation_confidence = Some(1.0);
        let alert = validate(raw, metadata()).unwrap();
        assert_eq!(alert.confidence.overall_score, 0.0);
        assert_eq!(alert.confidence.interpretation_confidence, 1.0);
    }

    #[test]
    fn test_null_deadline_and_missing_notes_accepted() {
        let mut raw = valid_raw();
        raw.interpretation.estimated_deadline = None;
        raw.confidence.notes = None;
        let alert = validate(raw, metadata()).unwrap();
        assert!(alert.interpretation.estimated_deadline.is_none());
        assert!(alert.confidence.notes.is_none());
    }
}
