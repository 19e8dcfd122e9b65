//! Closed vocabularies used by the knowledge tables.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional consequence of a known variant on its gene product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantEffect {
    Normal,
    Decreased,
    SignificantlyDecreased,
    LossOfFunction,
    Increased,
    DecreasedTransport,
    IncreasedTransport,
    /// Gene-annotated record whose variant is not in the knowledge base.
    Unknown,
}

impl VariantEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantEffect::Normal                 => "normal",
            VariantEffect::Decreased              => "decreased",
            VariantEffect::SignificantlyDecreased => "significantly_decreased",
            VariantEffect::LossOfFunction         => "loss_of_function",
            VariantEffect::Increased              => "increased",
            VariantEffect::DecreasedTransport     => "decreased_transport",
            VariantEffect::IncreasedTransport     => "increased_transport",
            VariantEffect::Unknown                => "unknown",
        }
    }
}

impl fmt::Display for VariantEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metabolizer phenotype. Serialised as its short code (`PM`, `IM`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phenotype {
    #[serde(rename = "PM")]
    Poor,
    #[serde(rename = "IM")]
    Intermediate,
    #[serde(rename = "NM")]
    Normal,
    #[serde(rename = "RM")]
    Rapid,
    #[serde(rename = "URM")]
    Ultrarapid,
    Unknown,
}

impl Phenotype {
    /// Phenotypes with a row in the drug risk table, in table column order.
    pub const CLASSIFIED: [Phenotype; 5] = [
        Phenotype::Poor,
        Phenotype::Intermediate,
        Phenotype::Normal,
        Phenotype::Rapid,
        Phenotype::Ultrarapid,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Phenotype::Poor         => "PM",
            Phenotype::Intermediate => "IM",
            Phenotype::Normal       => "NM",
            Phenotype::Rapid        => "RM",
            Phenotype::Ultrarapid   => "URM",
            Phenotype::Unknown      => "Unknown",
        }
    }

    /// Display label shown to clinicians.
    pub fn label(&self) -> &'static str {
        match self {
            Phenotype::Poor         => "Poor Metabolizer",
            Phenotype::Intermediate => "Intermediate Metabolizer",
            Phenotype::Normal       => "Normal Metabolizer",
            Phenotype::Rapid        => "Rapid Metabolizer",
            Phenotype::Ultrarapid   => "Ultrarapid Metabolizer",
            Phenotype::Unknown      => "Unknown",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Clinical action category for a (drug, phenotype) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Toxic,
    Ineffective,
    Unknown,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Safe         => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Toxic        => "Toxic",
            RiskLabel::Ineffective  => "Ineffective",
            RiskLabel::Unknown      => "Unknown",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None     => "none",
            Severity::Low      => "low",
            Severity::Moderate => "moderate",
            Severity::High     => "high",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
