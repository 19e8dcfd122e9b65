//! Final per-drug report.
//!
//! Field names are the external contract consumed by downstream callers.
//! Every block is always present: missing narrative text becomes an empty
//! string, an empty list, or rule-based fallback text.

use chrono::{DateTime, SecondsFormat, Utc};
use pharmagen_kb::{KnowledgeBase, Phenotype, RiskLabel, Severity};
use serde::{Deserialize, Serialize};

use crate::models::{DetectedVariant, DrugAnalysis};
use crate::narrative::NarrativeBundle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub patient_id: String,
    pub drug: String,
    /// ISO-8601 UTC, millisecond precision.
    pub timestamp: String,
    pub risk_assessment: RiskAssessment,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: LlmGeneratedExplanation,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: String,
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub phenotype_label: String,
    pub detected_variants: Vec<DetectedVariant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub recommendation: String,
    pub alternative_drugs: Vec<String>,
    pub monitoring_parameters: Vec<String>,
    pub cpic_guideline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmGeneratedExplanation {
    pub summary: String,
    pub mechanism_explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    /// Annotated records parsed from the input.
    pub variants_detected: usize,
    pub pharmacogenomic_variants_found: usize,
}

/// Build the report for one drug, stamped with the current time.
pub fn assemble(
    kb: &KnowledgeBase,
    patient_id: &str,
    drug: &str,
    analysis: &DrugAnalysis,
    narrative: Option<&NarrativeBundle>,
    total_variants: usize,
) -> Report {
    assemble_at(kb, patient_id, drug, analysis, narrative, total_variants, Utc::now())
}

/// As [`assemble`], with an explicit timestamp.
pub fn assemble_at(
    kb: &KnowledgeBase,
    patient_id: &str,
    drug: &str,
    analysis: &DrugAnalysis,
    narrative: Option<&NarrativeBundle>,
    total_variants: usize,
    at: DateTime<Utc>,
) -> Report {
    let recommendation = narrative
        .and_then(NarrativeBundle::clinical_recommendation)
        .map(str::to_string)
        .unwrap_or_else(|| kb.recommendation(drug, analysis.risk_label).to_string());

    let cpic_guideline = narrative
        .and_then(NarrativeBundle::cpic_guideline_reference)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Guideline reference for {drug}"));

    Report {
        patient_id: patient_id.to_string(),
        drug: drug.to_string(),
        timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),

        risk_assessment: RiskAssessment {
            risk_label: analysis.risk_label,
            confidence_score: analysis.confidence,
            severity: analysis.severity,
        },

        pharmacogenomic_profile: PharmacogenomicProfile {
            primary_gene: analysis.gene.clone(),
            diplotype: analysis.diplotype.clone(),
            phenotype: analysis.phenotype,
            phenotype_label: analysis.phenotype_label.clone(),
            detected_variants: analysis.detected_variants.clone(),
        },

        clinical_recommendation: ClinicalRecommendation {
            recommendation,
            alternative_drugs: narrative.map(NarrativeBundle::alternative_drugs).unwrap_or_default(),
            monitoring_parameters: narrative.map(NarrativeBundle::monitoring_parameters).unwrap_or_default(),
            cpic_guideline,
        },

        llm_generated_explanation: LlmGeneratedExplanation {
            summary: narrative
                .and_then(NarrativeBundle::summary)
                .unwrap_or_default()
                .to_string(),
            mechanism_explanation: narrative
                .and_then(NarrativeBundle::mechanism_explanation)
                .unwrap_or_default()
                .to_string(),
        },

        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            variants_detected: total_variants,
            pharmacogenomic_variants_found: analysis.detected_variants.len(),
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
