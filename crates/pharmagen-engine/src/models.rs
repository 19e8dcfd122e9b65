//! Analysis output types.

use pharmagen_kb::{Phenotype, RiskLabel, Severity, VariantEffect};
use serde::{Deserialize, Serialize};

/// A parsed record that is relevant to the gene under analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedVariant {
    /// rsID, or `unknown` for gene-annotated rows without one.
    pub rsid: String,
    pub gene: String,
    pub star_allele: String,
    pub effect: VariantEffect,
    pub chromosome: String,
    pub position: String,
    pub reference: String,
    pub alternate: String,
}

/// Structured result for one (patient, drug) pair. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugAnalysis {
    pub drug: String,
    pub gene: String,
    pub mechanism: String,
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub phenotype_label: String,
    pub risk_label: RiskLabel,
    pub severity: Severity,
    /// In [0, 1].
    pub confidence: f64,
    /// Baseline 1.0 plus the impact of every curated detected variant.
    pub activity_score: f64,
    pub detected_variants: Vec<DetectedVariant>,
}
