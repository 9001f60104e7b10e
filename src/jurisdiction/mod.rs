//! Jurisdiction detection - picks the likely regulatory authority context
//! for a document before extraction.
//!
//! Detection is advisory: it steers the prompt toward the right domain
//! vocabulary, but the model's own classification may disagree and the
//! pipeline never hard-fails on a mismatch.

pub mod profiles;

use regex::Regex;
use tracing::{debug, warn};

use crate::types::alert::{Country, TaxType};

pub use profiles::{eu_context, uk_hmrc_context, us_irs_context};

/// Static reference data for one tax jurisdiction.
///
/// Read-only after construction; never mutated at runtime.
#[derive(Debug, Clone)]
pub struct JurisdictionContext {
    pub country: Country,

    /// Full authority name, e.g. "Internal Revenue Service (IRS)".
    pub authority: String,

    /// Tax types this authority commonly issues guidance on.
    pub common_tax_types: Vec<TaxType>,

    /// Date formats typically used in this jurisdiction's documents.
    pub date_formats: Vec<String>,

    /// Terms whose presence suggests this jurisdiction.
    pub key_terms: Vec<String>,

    /// Patterns matching this jurisdiction's document references
    /// (e.g. "Notice 2024-45", "Finance Act 2023").
    pub document_patterns: Vec<Regex>,

    /// Jurisdiction-specific guidance appended to the extraction prompt.
    pub hints: String,
}

impl JurisdictionContext {
    /// Score how strongly `text` matches this jurisdiction.
    ///
    /// 10 points for an authority-name match, 2 per key term, 5 per
    /// document-pattern match. Deterministic: no randomness, identical
    /// input always yields the identical score.
    pub fn score(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        let mut score = 0;

        if lower.contains(&self.authority.to_lowercase()) {
            score += 10;
        }

        for term in &self.key_terms {
            if lower.contains(&term.to_lowercase()) {
                score += 2;
            }
        }

        for pattern in &self.document_patterns {
            if pattern.is_match(text) {
                score += 5;
            }
        }

        score
    }

    /// First document-reference match in `text`, if any.
    pub fn extract_document_reference(&self, text: &str) -> Option<String> {
        self.document_patterns
            .iter()
            .find_map(|pattern| pattern.find(text))
            .map(|m| m.as_str().to_string())
    }

    /// Whether a model-classified country is consistent with this context.
    ///
    /// `OTHER` is always consistent - it signals the model saw something
    /// outside the known jurisdictions.
    pub fn matches_country(&self, country: Country) -> bool {
        country == self.country || country == Country::Other
    }
}

/// The set of known jurisdiction profiles plus a fallback policy.
///
/// The fallback is a product decision, not a technical one, so it is set at
/// construction rather than hardcoded in the detector.
#[derive(Debug, Clone)]
pub struct JurisdictionTable {
    profiles: Vec<JurisdictionContext>,
    fallback: usize,
}

impl JurisdictionTable {
    /// Create a table from profiles. The first profile is the fallback
    /// until [`with_fallback`](Self::with_fallback) says otherwise.
    ///
    /// At least one profile is required.
    pub fn new(profiles: Vec<JurisdictionContext>) -> Self {
        assert!(
            !profiles.is_empty(),
            "JurisdictionTable requires at least one profile"
        );
        Self {
            profiles,
            fallback: 0,
        }
    }

    /// The built-in US IRS / UK HMRC / EU profiles, falling back to US.
    pub fn builtin() -> Self {
        Self::new(vec![us_irs_context(), uk_hmrc_context(), eu_context()])
    }

    /// Set the fallback jurisdiction by country. No-op if no profile for
    /// that country exists.
    pub fn with_fallback(mut self, country: Country) -> Self {
        if let Some(index) = self.profiles.iter().position(|p| p.country == country) {
            self.fallback = index;
        }
        self
    }

    /// All known profiles.
    pub fn profiles(&self) -> &[JurisdictionContext] {
        &self.profiles
    }

    /// The fallback profile.
    pub fn fallback(&self) -> &JurisdictionContext {
        &self.profiles[self.fallback]
    }

    /// Detect the most likely jurisdiction for `text`.
    ///
    /// Returns the highest-scoring profile; an all-zero result or a shared
    /// top score resolves to the fallback profile.
    pub fn detect(&self, text: &str) -> &JurisdictionContext {
        let scores: Vec<u32> = self.profiles.iter().map(|p| p.score(text)).collect();

        let labeled: Vec<(&str, u32)> = self
            .profiles
            .iter()
            .zip(&scores)
            .map(|(p, s)| (p.country.as_str(), *s))
            .collect();
        debug!(scores = ?labeled, "jurisdiction detection scores");

        let top = scores.iter().copied().max().unwrap_or(0);
        if top == 0 {
            warn!(
                fallback = %self.fallback().country,
                "no jurisdiction match found, using fallback"
            );
            return self.fallback();
        }

        if scores.iter().filter(|s| **s == top).count() > 1 {
            debug!(
                fallback = %self.fallback().country,
                "jurisdiction scores tied, using fallback"
            );
            return self.fallback();
        }

        let winner = scores
            .iter()
            .position(|s| *s == top)
            .unwrap_or(self.fallback);
        debug!(
            country = %self.profiles[winner].country,
            confidence = top,
            "detected jurisdiction"
        );
        &self.profiles[winner]
    }
}

impl Default for JurisdictionTable {
    fn default() -> Self {
        Self::builtin()
    }
}
