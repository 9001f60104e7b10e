//! Integration tests for the full extraction pipeline.
//!
//! These drive the orchestrator end to end with a mock model:
//! 1. Input gating before any model call
//! 2. Normalization of fenced / near-miss model output
//! 3. Schema rejection of out-of-range payloads
//! 4. Advisory confidence gating
//! 5. Batch failure isolation

use tax_alert_extraction::{
    testing::{sample_alert_value, sample_notice_text, MockModel},
    Country, ExtractOptions, ExtractionError, Extractor, RiskLevel, TaxType, MIN_INPUT_CHARS,
};

/// Helper: extractor whose model always answers with `payload`.
fn extractor_with_payload(payload: serde_json::Value) -> Extractor<MockModel> {
    Extractor::new(MockModel::new().with_response(payload.to_string()))
}

#[tokio::test]
async fn test_full_pipeline_produces_validated_alert() {
    let extractor = Extractor::new(MockModel::new());

    let outcome = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.alert.classification.country, Country::Us);
    assert_eq!(outcome.alert.classification.tax_type, TaxType::Gilti);
    assert_eq!(outcome.alert.classification.priority, RiskLevel::High);
    assert_eq!(outcome.alert.metadata.model_used, "mock-model");
    assert_eq!(
        outcome.alert.metadata.source_length,
        sample_notice_text().chars().count()
    );
    assert_eq!(outcome.detected_country, Country::Us);
    assert_eq!(
        outcome.document_reference.as_deref(),
        Some("Notice 2024-45")
    );
    assert!(outcome.warnings.is_empty());
}

#[tokio::test]
async fn test_short_input_rejected_before_model_call() {
    let extractor = Extractor::new(MockModel::new());

    let err = extractor
        .extract("Tax notice", &ExtractOptions::default())
        .await
        .unwrap_err();

    match err {
        ExtractionError::InputTooShort { length, minimum } => {
            assert_eq!(length, 10);
            assert_eq!(minimum, MIN_INPUT_CHARS);
        }
        other => panic!("expected InputTooShort, got {other:?}"),
    }
    assert_eq!(extractor.model().call_count(), 0);
}

#[tokio::test]
async fn test_fenced_model_output_is_accepted() {
    let fenced = format!("```json\n{}\n```", sample_alert_value());
    let extractor = Extractor::new(MockModel::new().with_response(fenced));

    let outcome = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.alert.classification.tax_type, TaxType::Gilti);
}

#[tokio::test]
async fn test_near_miss_enums_are_repaired_end_to_end() {
    let mut payload = sample_alert_value();
    payload["classification"]["country"] = "USA".into();
    payload["classification"]["tax_type"] =
        "GILTI (Global Intangible Low-Taxed Income)".into();
    payload["interpretation"]["compliance_risk"] = "Medium risk".into();

    let extractor = extractor_with_payload(payload);
    let outcome = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.alert.classification.country, Country::Us);
    assert_eq!(outcome.alert.classification.tax_type, TaxType::Gilti);
    assert_eq!(
        outcome.alert.interpretation.compliance_risk,
        RiskLevel::Medium
    );
}

#[tokio::test]
async fn test_unknown_enum_fails_schema_not_default() {
    let mut payload = sample_alert_value();
    payload["classification"]["tax_type"] = "Income Tax".into();

    let extractor = extractor_with_payload(payload);
    let err = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap_err();

    match err {
        ExtractionError::Schema { field, .. } => {
            assert_eq!(field, "classification.tax_type");
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[tokio::test]
async fn test_out_of_range_confidence_fails_schema() {
    let mut payload = sample_alert_value();
    payload["confidence"]["overall_score"] = 1.5.into();

    let extractor = extractor_with_payload(payload);
    let err = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap_err();

    match err {
        ExtractionError::Schema { field, .. } => {
            assert_eq!(field, "confidence.overall_score");
        }
        other => panic!("expected Schema, got {other:?}"),
    }
}

#[tokio::test]
async fn test_below_threshold_confidence_warns_but_returns() {
    let mut payload = sample_alert_value();
    payload["confidence"]["overall_score"] = 0.4.into();

    let extractor = extractor_with_payload(payload);
    let outcome = extractor
        .extract(
            sample_notice_text(),
            &ExtractOptions::new().with_min_confidence(0.9),
        )
        .await
        .unwrap();

    assert_eq!(outcome.alert.confidence.overall_score, 0.4);
    assert!(
        outcome.warnings.iter().any(|w| w.contains("below threshold")),
        "expected a threshold warning, got {:?}",
        outcome.warnings
    );
}

#[tokio::test]
async fn test_jurisdiction_mismatch_is_a_warning_not_an_error() {
    // UK document, but the model classifies it as US.
    let uk_text = "HMRC has published Revenue & Customs Brief 12/2024 on the Energy \
                   Profits Levy and Ring Fence Corporation Tax under Finance Act 2023.";

    let extractor = Extractor::new(MockModel::new());
    let outcome = extractor
        .extract(uk_text, &ExtractOptions::default())
        .await
        .unwrap();

    assert_eq!(outcome.detected_country, Country::Uk);
    assert_eq!(outcome.alert.classification.country, Country::Us);
    assert!(
        outcome.warnings.iter().any(|w| w.contains("disagrees")),
        "expected a mismatch warning, got {:?}",
        outcome.warnings
    );
}

#[tokio::test]
async fn test_upstream_failure_propagates() {
    let extractor = Extractor::new(MockModel::new().fail_when("poison"));
    let text = format!("{} poison", sample_notice_text());

    let err = extractor
        .extract(&text, &ExtractOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractionError::Upstream { .. }));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unparsable_response_is_parse_error() {
    let extractor =
        Extractor::new(MockModel::new().with_response("Sorry, I cannot help with that."));

    let err = extractor
        .extract(sample_notice_text(), &ExtractOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ExtractionError::Parse { .. }));
}

#[tokio::test]
async fn test_batch_isolates_failures() {
    let good = sample_notice_text().to_string();
    let bad = format!("{} poison", sample_notice_text());
    let too_short = "Tax notice".to_string();

    let extractor = Extractor::new(MockModel::new().fail_when("poison"));
    let outcome = extractor
        .extract_batch(
            &[good, bad, too_short],
            &ExtractOptions::default(),
        )
        .await;

    assert_eq!(outcome.results.len(), 3);
    assert_eq!(outcome.succeeded, 1);
    assert_eq!(outcome.failed, 2);
    assert!(!outcome.is_success());

    // The first item's success survives its neighbors' failures.
    let first = outcome.results[0].as_ref().unwrap();
    assert_eq!(first.alert.classification.country, Country::Us);
    assert!(matches!(
        outcome.results[1],
        Err(ExtractionError::Upstream { .. })
    ));
    assert!(matches!(
        outcome.results[2],
        Err(ExtractionError::InputTooShort { .. })
    ));
}

#[tokio::test]
async fn test_batch_on_empty_input_is_trivially_successful() {
    let extractor = Extractor::new(MockModel::new());
    let outcome = extractor
        .extract_batch(&[], &ExtractOptions::default())
        .await;

    assert!(outcome.results.is_empty());
    assert!(outcome.is_success());
    assert_eq!(extractor.model().call_count(), 0);
}

#[tokio::test]
async fn test_detection_steers_prompt_per_item() {
    // Distinct canned responses keyed on the document text prove each batch
    // item went through its own full pipeline pass.
    let mut eu_payload = sample_alert_value();
    eu_payload["classification"]["country"] = "EU".into();
    eu_payload["classification"]["tax_type"] = "VAT".into();

    let model = MockModel::new().respond_when("Council Directive", eu_payload.to_string());
    let extractor = Extractor::new(model);

    let us_text = sample_notice_text().to_string();
    let eu_text = "The European Commission adopted Council Directive 2022/2523 \
                   implementing Pillar Two; CBAM reporting under Regulation (EU) \
                   2023/956 begins next year."
        .to_string();

    let outcome = extractor
        .extract_batch(&[us_text, eu_text], &ExtractOptions::default())
        .await;

    assert_eq!(outcome.succeeded, 2);
    let us = outcome.results[0].as_ref().unwrap();
    let eu = outcome.results[1].as_ref().unwrap();
    assert_eq!(us.alert.classification.country, Country::Us);
    assert_eq!(eu.alert.classification.country, Country::Eu);
    assert_eq!(eu.alert.classification.tax_type, TaxType::Vat);
    assert_eq!(eu.detected_country, Country::Eu);
}
