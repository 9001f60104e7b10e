//! Domain types - the validated output of the extraction pipeline.

pub mod alert;

pub use alert::{
    AlertContent, Classification, Confidence, Country, Interpretation, Metadata, RiskLevel,
    TaxAlert, TaxType,
};
