//! Extraction prompt construction.
//!
//! The system prompt fixes the output to a single JSON object in the
//! TaxAlert shape and enumerates the exact enum literals. Priority
//! heuristics are stated as guidance only - the schema validator is the
//! actual enforcement point. Jurisdiction-specific hints are appended to
//! steer domain vocabulary.

use crate::jurisdiction::JurisdictionContext;

/// Base system prompt, before jurisdiction hints.
pub const SYSTEM_PROMPT: &str = r#"You are an expert tax analyst extracting and interpreting tax notifications for a multinational energy company with global operations (upstream oil & gas, refining, renewables, trading).

Your role is to:
1. Accurately extract structured information from tax notifications (US IRS, UK HMRC, EU, etc.)
2. Classify the notification by country, tax type, and priority
3. Provide an interpretation of the impact on the company's operations, with action items
4. Assess compliance risks and deadlines

CRITICAL GUIDELINES:
- Be precise and factual - only extract information explicitly stated in the document
- Priority assessment: CRITICAL = immediate compliance risk or major financial impact (>$10M), HIGH = significant impact (<90 days), MEDIUM = moderate impact, LOW = informational
- Tax type classification: use the most specific category available
- Confidence scoring: be honest about uncertainty - score lower if the document is ambiguous
- Deadlines: extract exact dates if stated, otherwise provide the best estimate with caveats

IMPORTANT - EXACT ENUM VALUES:
Use ONLY these exact values (no additional text or descriptions):
- country: "US", "UK", "EU", or "OTHER"
- tax_type: "Corporate Tax", "VAT", "Transfer Pricing", "GILTI", "Sales Tax", "Energy Tax", "Withholding Tax", "Customs Duty", or "Other"
- priority: "CRITICAL", "HIGH", "MEDIUM", or "LOW"
- compliance_risk: "CRITICAL", "HIGH", "MEDIUM", or "LOW"

OUTPUT FORMAT:
Return ONLY a valid JSON object matching this structure (no markdown, no additional text):
{
  "classification": { "country": "US", "tax_type": "GILTI", "priority": "HIGH" },
  "content": { "title": "...", "summary": "...", "key_changes": [...], "affected_entities": [...] },
  "interpretation": { "domain_specific_impact": "...", "required_actions": [...], "compliance_risk": "HIGH", "estimated_deadline": "..." },
  "confidence": { "overall_score": 0.92, "classification_confidence": 0.95, "interpretation_confidence": 0.89, "notes": "..." }
}"#;

/// A built prompt pair: a fixed system prompt and a user-prompt template.
#[derive(Debug, Clone)]
pub struct ExtractionPrompt {
    /// System prompt, including jurisdiction hints.
    pub system: String,
}

impl ExtractionPrompt {
    /// Build the user prompt for one document.
    pub fn user(&self, text: &str) -> String {
        format!(
            r#"Extract structured tax alert information from the following tax notification document:

=== TAX NOTIFICATION DOCUMENT ===
{text}
=== END OF DOCUMENT ===

Please analyze this document and return a JSON object with the classification, content summary, domain-specific interpretation, and confidence scores.

Remember:
- Focus on facts stated in the document
- Consider the company's global energy business context (upstream oil & gas, downstream refining, renewables, trading)
- Provide actionable insights and specific deadline information
- Be conservative with confidence scores if information is unclear"#
        )
    }
}

/// Build the extraction prompt for a detected jurisdiction.
pub fn build_prompt(context: &JurisdictionContext) -> ExtractionPrompt {
    let system = if context.hints.is_empty() {
        SYSTEM_PROMPT.to_string()
    } else {
        format!("{SYSTEM_PROMPT}\n\n{}", context.hints.trim_end())
    };
    ExtractionPrompt { system }
}
