//! In-memory knowledge base.
//!
//! Build once at startup with [`KnowledgeBase::curated`] and share it by
//! reference (or as `Arc<KnowledgeBase>`); it is never written after load.
//! The `with_*` builders exist for custom tables in tests and tooling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::curated::{CONFIDENCE, DRUG_GENES, DRUG_PHENOTYPE_RISKS, KNOWN_VARIANTS, SEVERITY};
use crate::recommendations::{GENERIC_RECOMMENDATION, RECOMMENDATIONS};
use crate::types::{Phenotype, RiskLabel, Severity, VariantEffect};

/// Severity used when a risk label has no severity entry.
const DEFAULT_SEVERITY: Severity = Severity::Low;
/// Confidence used when a risk label has no confidence entry.
const DEFAULT_CONFIDENCE: f64 = 0.5;

/// A variant with a curated functional annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownVariant {
    pub gene: String,
    pub star_allele: String,
    pub effect: VariantEffect,
    /// Signed contribution to the activity score, typically in [-1, +1].
    pub activity_impact: f64,
}

/// A supported drug and the gene that governs its response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrugProfile {
    pub name: String,
    pub gene: String,
    pub mechanism: String,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    variants: HashMap<String, KnownVariant>,
    /// Kept as a list so the catalog order is stable in messages.
    drugs: Vec<DrugProfile>,
    risks: HashMap<(String, Phenotype), RiskLabel>,
    severity: HashMap<RiskLabel, Severity>,
    confidence: HashMap<RiskLabel, f64>,
    recommendations: HashMap<(String, RiskLabel), String>,
}

impl KnowledgeBase {
    // ── Constructors ──────────────────────────────────────────────────────────

    /// An empty knowledge base: every lookup falls through to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The compiled-in curated tables.
    pub fn curated() -> Self {
        let mut kb = Self::empty();

        for &(rsid, gene, star, effect, impact) in KNOWN_VARIANTS {
            kb = kb.with_variant(rsid, gene, star, effect, impact);
        }
        for &(drug, gene, mechanism) in DRUG_GENES {
            kb = kb.with_drug(drug, gene, mechanism);
        }
        for (drug, labels) in DRUG_PHENOTYPE_RISKS {
            for (phenotype, label) in Phenotype::CLASSIFIED.iter().zip(labels.iter()) {
                kb = kb.with_risk(drug, *phenotype, *label);
            }
        }
        for &(label, severity) in SEVERITY {
            kb.severity.insert(label, severity);
        }
        for &(label, confidence) in CONFIDENCE {
            kb.confidence.insert(label, confidence);
        }
        for (drug, texts) in RECOMMENDATIONS {
            let labels = [
                RiskLabel::Safe,
                RiskLabel::AdjustDosage,
                RiskLabel::Toxic,
                RiskLabel::Ineffective,
            ];
            for (label, text) in labels.iter().zip(texts.iter()) {
                kb = kb.with_recommendation(drug, *label, *text);
            }
        }

        tracing::debug!(
            variants = kb.variants.len(),
            drugs = kb.drugs.len(),
            "Curated knowledge base loaded"
        );
        kb
    }

    pub fn with_variant(
        mut self,
        rsid: &str,
        gene: &str,
        star_allele: &str,
        effect: VariantEffect,
        activity_impact: f64,
    ) -> Self {
        self.variants.insert(
            rsid.to_string(),
            KnownVariant {
                gene: gene.to_string(),
                star_allele: star_allele.to_string(),
                effect,
                activity_impact,
            },
        );
        self
    }

    /// Add a drug, replacing any existing profile with the same name.
    pub fn with_drug(mut self, name: &str, gene: &str, mechanism: &str) -> Self {
        let name = normalise_drug(name);
        let profile = DrugProfile {
            name: name.clone(),
            gene: gene.to_string(),
            mechanism: mechanism.to_string(),
        };
        match self.drugs.iter_mut().find(|d| d.name == name) {
            Some(existing) => *existing = profile,
            None => self.drugs.push(profile),
        }
        self
    }

    pub fn with_risk(mut self, drug: &str, phenotype: Phenotype, label: RiskLabel) -> Self {
        self.risks.insert((normalise_drug(drug), phenotype), label);
        self
    }

    pub fn with_recommendation(mut self, drug: &str, label: RiskLabel, text: &str) -> Self {
        self.recommendations.insert((normalise_drug(drug), label), text.to_string());
        self
    }

    // ── Lookup ────────────────────────────────────────────────────────────────

    pub fn known_variant(&self, rsid: &str) -> Option<&KnownVariant> {
        self.variants.get(rsid)
    }

    /// Case-insensitive drug lookup. `None` means the drug is unsupported.
    pub fn drug(&self, name: &str) -> Option<&DrugProfile> {
        let name = normalise_drug(name);
        self.drugs.iter().find(|d| d.name == name)
    }

    /// Supported drugs in catalog order.
    pub fn drugs(&self) -> &[DrugProfile] {
        &self.drugs
    }

    /// Catalog rendered for "unsupported drug" messages, e.g. `CODEINE, WARFARIN`.
    pub fn supported_drug_list(&self) -> String {
        self.drugs
            .iter()
            .map(|d| d.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Risk for a (drug, phenotype) pair; `Unknown` when the pair is absent.
    pub fn risk_label(&self, drug: &str, phenotype: Phenotype) -> RiskLabel {
        self.risks
            .get(&(normalise_drug(drug), phenotype))
            .copied()
            .unwrap_or(RiskLabel::Unknown)
    }

    pub fn severity(&self, label: RiskLabel) -> Severity {
        self.severity.get(&label).copied().unwrap_or(DEFAULT_SEVERITY)
    }

    pub fn confidence(&self, label: RiskLabel) -> f64 {
        self.confidence.get(&label).copied().unwrap_or(DEFAULT_CONFIDENCE)
    }

    /// Rule-based recommendation text, or the generic specialist referral.
    pub fn recommendation(&self, drug: &str, label: RiskLabel) -> &str {
        self.recommendations
            .get(&(normalise_drug(drug), label))
            .map(String::as_str)
            .unwrap_or(GENERIC_RECOMMENDATION)
    }
}

fn normalise_drug(name: &str) -> String {
    name.trim().to_uppercase()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curated_table_sizes() {
        let kb = KnowledgeBase::curated();
        assert_eq!(kb.variants.len(), 21);
        assert_eq!(kb.drugs().len(), 12);
    }

    #[test]
    fn test_known_variant_lookup() {
        let kb = KnowledgeBase::curated();
        let v = kb.known_variant("rs3892097").unwrap();
        assert_eq!(v.gene, "CYP2D6");
        assert_eq!(v.star_allele, "*4");
        assert_eq!(v.effect, VariantEffect::LossOfFunction);
        assert_eq!(v.activity_impact, -1.0);
        assert!(kb.known_variant("rs0").is_none());
    }

    #[test]
    fn test_drug_lookup_case_insensitive() {
        let kb = KnowledgeBase::curated();
        let d = kb.drug(" clopidogrel ").unwrap();
        assert_eq!(d.name, "CLOPIDOGREL");
        assert_eq!(d.gene, "CYP2C19");
        assert!(kb.drug("ASPIRIN").is_none());
    }

    #[test]
    fn test_supported_drug_list_keeps_catalog_order() {
        let kb = KnowledgeBase::curated();
        let list = kb.supported_drug_list();
        assert!(list.starts_with("CODEINE, WARFARIN, CLOPIDOGREL"));
        assert!(list.ends_with("MERCAPTOPURINE, CAPECITABINE"));
    }

    #[test]
    fn test_every_drug_has_full_risk_row() {
        let kb = KnowledgeBase::curated();
        for drug in kb.drugs() {
            for phenotype in Phenotype::CLASSIFIED {
                assert_ne!(
                    kb.risk_label(&drug.name, phenotype),
                    RiskLabel::Unknown,
                    "{} / {}", drug.name, phenotype
                );
            }
        }
    }

    #[test]
    fn test_risk_table_entries() {
        let kb = KnowledgeBase::curated();
        assert_eq!(kb.risk_label("CODEINE", Phenotype::Intermediate), RiskLabel::AdjustDosage);
        assert_eq!(kb.risk_label("CODEINE", Phenotype::Ultrarapid), RiskLabel::Toxic);
        assert_eq!(kb.risk_label("OMEPRAZOLE", Phenotype::Rapid), RiskLabel::Ineffective);
        assert_eq!(kb.risk_label("CODEINE", Phenotype::Unknown), RiskLabel::Unknown);
        assert_eq!(kb.risk_label("ASPIRIN", Phenotype::Normal), RiskLabel::Unknown);
    }

    #[test]
    fn test_severity_and_confidence_maps() {
        let kb = KnowledgeBase::curated();
        assert_eq!(kb.severity(RiskLabel::Safe), Severity::None);
        assert_eq!(kb.severity(RiskLabel::Toxic), Severity::Critical);
        assert_eq!(kb.severity(RiskLabel::Unknown), Severity::Low);
        assert_eq!(kb.confidence(RiskLabel::Safe), 0.92);
        assert_eq!(kb.confidence(RiskLabel::Unknown), 0.40);
    }

    #[test]
    fn test_unmapped_label_defaults() {
        let kb = KnowledgeBase::empty();
        assert_eq!(kb.severity(RiskLabel::Toxic), Severity::Low);
        assert_eq!(kb.confidence(RiskLabel::Toxic), 0.5);
    }

    #[test]
    fn test_recommendation_fallbacks() {
        let kb = KnowledgeBase::curated();
        assert_eq!(
            kb.recommendation("WARFARIN", RiskLabel::Toxic),
            "Significantly reduce warfarin dose (>50%). Intensive INR monitoring required. Consider direct oral anticoagulants."
        );
        assert_eq!(kb.recommendation("WARFARIN", RiskLabel::Unknown), GENERIC_RECOMMENDATION);
        assert_eq!(kb.recommendation("ASPIRIN", RiskLabel::Safe), GENERIC_RECOMMENDATION);
    }

    #[test]
    fn test_with_drug_replaces_existing() {
        let kb = KnowledgeBase::curated().with_drug("codeine", "CYP3A4", "test");
        assert_eq!(kb.drugs().len(), 12);
        assert_eq!(kb.drug("CODEINE").unwrap().gene, "CYP3A4");
    }
}
