//! Built-in jurisdiction profiles: US IRS, UK HMRC, and the EU.
//!
//! Keyword and pattern sets reflect the document conventions of each
//! authority. Profiles are constructed fresh per table so callers can own
//! and customize them.

use regex::Regex;

use super::JurisdictionContext;
use crate::types::alert::{Country, TaxType};

fn compile_patterns(sources: &[&str]) -> Vec<Regex> {
    sources
        .iter()
        .map(|s| Regex::new(s).expect("built-in jurisdiction pattern must compile"))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// US Internal Revenue Service.
pub fn us_irs_context() -> JurisdictionContext {
    JurisdictionContext {
        country: Country::Us,
        authority: "Internal Revenue Service (IRS)".to_string(),
        common_tax_types: vec![
            TaxType::CorporateTax,
            TaxType::Gilti,
            TaxType::TransferPricing,
            TaxType::WithholdingTax,
            TaxType::SalesTax,
            TaxType::EnergyTax,
        ],
        date_formats: strings(&["MM/DD/YYYY", "YYYY-MM-DD"]),
        key_terms: strings(&[
            "IRS",
            "Internal Revenue Code",
            "IRC",
            "Treasury Regulation",
            "Treas. Reg.",
            "Revenue Ruling",
            "Rev. Rul.",
            "Notice",
            "Publication",
            "Form",
            "Schedule",
            "Tax Year",
            "Fiscal Year",
            "GILTI",
            "FDII",
            "Subpart F",
            "Section 482",
            "Advance Pricing Agreement",
            "APA",
        ]),
        document_patterns: compile_patterns(&[
            r"(?i)Notice\s+\d{4}-\d+",
            r"(?i)Revenue\s+Ruling\s+\d{4}-\d+",
            r"(?i)Rev\.\s*Rul\.\s+\d{4}-\d+",
            r"(?i)Treasury\s+Regulation\s+§\s*\d+\.\d+",
            r"(?i)IRC\s+§\s*\d+",
            r"(?i)Form\s+\d{3,4}[A-Z]?",
        ]),
        hints: "\
US IRS SPECIFIC GUIDANCE:
- Look for IRS Notice numbers, Revenue Rulings, or Treasury Regulations
- Tax types commonly include: Corporate Tax, GILTI, Transfer Pricing, FDII
- Dates typically in MM/DD/YYYY format
- Consider implications for US upstream operations, refineries, and trading entities
- GILTI and Subpart F income are critical for international operations
- Energy-specific: look for Section 45, 48 (renewable credits), Section 29 (unconventional fuel)
"
        .to_string(),
    }
}

/// UK His Majesty's Revenue and Customs.
pub fn uk_hmrc_context() -> JurisdictionContext {
    JurisdictionContext {
        country: Country::Uk,
        authority: "His Majesty's Revenue and Customs (HMRC)".to_string(),
        common_tax_types: vec![
            TaxType::CorporateTax,
            TaxType::Vat,
            TaxType::TransferPricing,
            TaxType::WithholdingTax,
            TaxType::EnergyTax,
            TaxType::CustomsDuty,
        ],
        date_formats: strings(&["DD/MM/YYYY", "YYYY-MM-DD"]),
        key_terms: strings(&[
            "HMRC",
            "Corporation Tax",
            "Value Added Tax",
            "VAT",
            "CTA",
            "Corporation Tax Act",
            "TCGA",
            "Taxation of Chargeable Gains Act",
            "Finance Act",
            "Finance Bill",
            "Statutory Instrument",
            "Accounting Period",
            "Diverted Profits Tax",
            "DPT",
            "Energy Profits Levy",
            "Ring Fence Corporation Tax",
            "RFCT",
        ]),
        document_patterns: compile_patterns(&[
            r"(?i)Revenue\s+&\s+Customs\s+Brief\s+\d+/\d{4}",
            r"(?i)Tax\s+Information\s+and\s+Impact\s+Note",
            r"(?i)\bTIIN\b",
            r"(?i)Finance\s+Act\s+\d{4}",
            r"(?i)\bSI\s+\d{4}/\d+",
            r"(?i)Statutory\s+Instrument\s+\d{4}/\d+",
        ]),
        hints: "\
UK HMRC SPECIFIC GUIDANCE:
- Look for Revenue & Customs Briefs, Finance Act references, Statutory Instruments
- Tax types commonly include: Corporation Tax, VAT, Energy Profits Levy (EPL), Ring Fence CT
- Dates typically in DD/MM/YYYY format
- Consider implications for North Sea operations, refineries, and the retail network
- The Energy Profits Levy is critical for upstream oil & gas operations
- Ring Fence Corporation Tax applies specifically to oil & gas extraction activities
"
        .to_string(),
    }
}

/// European Commission / member states.
pub fn eu_context() -> JurisdictionContext {
    JurisdictionContext {
        country: Country::Eu,
        authority: "European Commission / Member States".to_string(),
        common_tax_types: vec![
            TaxType::Vat,
            TaxType::CorporateTax,
            TaxType::TransferPricing,
            TaxType::CustomsDuty,
            TaxType::EnergyTax,
            TaxType::WithholdingTax,
        ],
        date_formats: strings(&["DD.MM.YYYY", "YYYY-MM-DD"]),
        key_terms: strings(&[
            "EU Directive",
            "Council Directive",
            "VAT Directive",
            "ATAD",
            "Anti-Tax Avoidance Directive",
            "CBAM",
            "Carbon Border Adjustment Mechanism",
            "DAC",
            "Directive on Administrative Cooperation",
            "BEPS",
            "Pillar One",
            "Pillar Two",
            "OECD",
            "Transfer Pricing",
            "State Aid",
        ]),
        document_patterns: compile_patterns(&[
            r"(?i)Directive\s+\d{4}/\d+/EU",
            r"(?i)Council\s+Directive\s+\d{4}/\d+",
            r"(?i)Regulation\s+\(EU\)\s+\d{4}/\d+",
            r"(?i)COM\(\d{4}\)\s+\d+",
        ]),
        hints: "\
EU SPECIFIC GUIDANCE:
- Look for EU Directives, Council Directives, Regulations
- Tax types commonly include: VAT, CBAM (Carbon Border Adjustment), ATAD provisions
- Multiple member states may be affected
- Consider implications across European refineries, trading hubs, and renewable projects
- CBAM is critical for carbon-intensive operations
- State Aid rules affect tax rulings and special regimes
"
        .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles_have_patterns_and_terms() {
        for context in [us_irs_context(), uk_hmrc_context(), eu_context()] {
            assert!(!context.key_terms.is_empty());
            assert!(!context.document_patterns.is_empty());
            assert!(!context.hints.is_empty());
            assert!(!context.common_tax_types.is_empty());
        }
    }

    #[test]
    fn test_us_patterns_match_reference_formats() {
        let context = us_irs_context();
        for sample in ["Notice 2024-45", "Rev. Rul. 2023-14", "Form 1120F"] {
            assert!(
                context.document_patterns.iter().any(|p| p.is_match(sample)),
                "no pattern matched {sample:?}"
            );
        }
    }

    #[test]
    fn test_eu_patterns_match_reference_formats() {
        let context = eu_context();
        for sample in [
            "Directive 2006/112/EU",
            "Regulation (EU) 2023/956",
            "COM(2021) 563",
        ] {
            assert!(
                context.document_patterns.iter().any(|p| p.is_match(sample)),
                "no pattern matched {sample:?}"
            );
        }
    }
}
