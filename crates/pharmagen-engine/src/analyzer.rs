//! Per-drug pharmacogenomic analysis.
//!
//! 1. Identify the variants relevant to the drug's primary gene
//! 2. Accumulate an activity score → phenotype (PM/IM/NM/RM/URM)
//! 3. Map (drug, phenotype) → risk label → severity and confidence

use pharmagen_kb::{KnowledgeBase, Phenotype, VariantEffect};
use pharmagen_vcf::VariantRecord;

use crate::models::{DetectedVariant, DrugAnalysis};
use crate::phenotype::{build_diplotype, classify_activity_score, BASELINE_ACTIVITY_SCORE};

/// Analyse parsed records for one drug.
///
/// Returns `None` when the drug is not in the catalog. Pure and
/// deterministic: the result depends only on the inputs and `kb`.
pub fn analyze(kb: &KnowledgeBase, variants: &[VariantRecord], drug: &str) -> Option<DrugAnalysis> {
    let profile = kb.drug(drug)?;
    let gene = profile.gene.as_str();

    let mut detected = Vec::new();
    let mut activity_score = BASELINE_ACTIVITY_SCORE;

    for v in variants {
        let known = v.rsid.as_deref().and_then(|id| kb.known_variant(id));
        let matches_gene =
            known.is_some_and(|k| k.gene == gene) || v.gene.as_deref() == Some(gene);
        if !matches_gene {
            continue;
        }

        if let Some(known) = known {
            detected.push(DetectedVariant {
                rsid: v.rsid.clone().unwrap_or_default(),
                gene: known.gene.clone(),
                star_allele: known.star_allele.clone(),
                effect: known.effect,
                chromosome: v.chrom.clone(),
                position: v.pos.clone(),
                reference: v.reference.clone(),
                alternate: v.alternate.clone(),
            });
            activity_score += known.activity_impact;
        } else if let Some(star) = v.star.as_deref() {
            // Gene matches but the variant is not curated: listed, not scored
            detected.push(DetectedVariant {
                rsid: v.rsid.clone().unwrap_or_else(|| "unknown".to_string()),
                gene: gene.to_string(),
                star_allele: star.to_string(),
                effect: VariantEffect::Unknown,
                chromosome: v.chrom.clone(),
                position: v.pos.clone(),
                reference: v.reference.clone(),
                alternate: v.alternate.clone(),
            });
        }
    }

    // No evidence is read as wild-type, not as an extreme score
    let phenotype = if detected.is_empty() {
        Phenotype::Normal
    } else {
        classify_activity_score(activity_score)
    };
    let risk_label = kb.risk_label(&profile.name, phenotype);
    let diplotype = build_diplotype(&detected);

    tracing::debug!(
        drug = %profile.name,
        gene,
        detected = detected.len(),
        activity_score,
        phenotype = phenotype.code(),
        risk = risk_label.as_str(),
        "Drug analysed"
    );

    Some(DrugAnalysis {
        drug: profile.name.clone(),
        gene: profile.gene.clone(),
        mechanism: profile.mechanism.clone(),
        diplotype,
        phenotype,
        phenotype_label: phenotype.label().to_string(),
        risk_label,
        severity: kb.severity(risk_label),
        confidence: kb.confidence(risk_label),
        activity_score,
        detected_variants: detected,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pharmagen_kb::{RiskLabel, Severity};
    use pharmagen_test_utils::fixtures::variant;

    #[test]
    fn test_unsupported_drug_is_none() {
        let kb = KnowledgeBase::curated();
        assert!(analyze(&kb, &[], "UNKNOWN_DRUG").is_none());
    }

    #[test]
    fn test_no_variants_is_wild_type_normal() {
        let kb = KnowledgeBase::curated();
        for drug in kb.drugs() {
            let a = analyze(&kb, &[], &drug.name).unwrap();
            assert_eq!(a.phenotype, Phenotype::Normal);
            assert_eq!(a.diplotype, "*1/*1");
            assert!(a.detected_variants.is_empty());
        }
    }

    #[test]
    fn test_single_loss_of_function_is_intermediate() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs3892097"), Some("CYP2D6"), Some("*4"))];
        let a = analyze(&kb, &vs, "CODEINE").unwrap();
        assert_eq!(a.gene, "CYP2D6");
        assert_eq!(a.diplotype, "*4/*1");
        assert_eq!(a.activity_score, 0.0);
        assert_eq!(a.phenotype, Phenotype::Intermediate);
        assert_eq!(a.phenotype_label, "Intermediate Metabolizer");
        assert_eq!(a.risk_label, RiskLabel::AdjustDosage);
        assert_eq!(a.severity, Severity::Moderate);
        assert_eq!(a.confidence, 0.85);
    }

    #[test]
    fn test_two_loss_of_function_is_poor() {
        let kb = KnowledgeBase::curated();
        let vs = [
            variant(Some("rs3892097"), None, None),
            variant(Some("rs35742686"), None, None),
        ];
        let a = analyze(&kb, &vs, "CODEINE").unwrap();
        assert_eq!(a.activity_score, -1.0);
        assert_eq!(a.diplotype, "*4/*3");
        assert_eq!(a.phenotype, Phenotype::Poor);
        assert_eq!(a.risk_label, RiskLabel::Ineffective);
    }

    #[test]
    fn test_increased_function_is_ultrarapid() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs12248560"), Some("CYP2C19"), Some("*17"))];
        let a = analyze(&kb, &vs, "CLOPIDOGREL").unwrap();
        assert_eq!(a.activity_score, 2.0);
        assert_eq!(a.phenotype, Phenotype::Ultrarapid);
        assert_eq!(a.risk_label, RiskLabel::AdjustDosage);
    }

    #[test]
    fn test_other_gene_variants_are_ignored() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs4244285"), Some("CYP2C19"), Some("*2"))];
        let a = analyze(&kb, &vs, "WARFARIN").unwrap();
        assert!(a.detected_variants.is_empty());
        assert_eq!(a.phenotype, Phenotype::Normal);
        assert_eq!(a.risk_label, RiskLabel::Safe);
    }

    #[test]
    fn test_uncurated_star_allele_listed_without_score() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(None, Some("TPMT"), Some("*8"))];
        let a = analyze(&kb, &vs, "AZATHIOPRINE").unwrap();
        assert_eq!(a.detected_variants.len(), 1);
        let d = &a.detected_variants[0];
        assert_eq!(d.rsid, "unknown");
        assert_eq!(d.effect, VariantEffect::Unknown);
        assert_eq!(d.star_allele, "*8");
        assert_eq!(a.activity_score, 1.0);
        assert_eq!(a.phenotype, Phenotype::Normal);
        assert_eq!(a.diplotype, "*8/*1");
    }

    #[test]
    fn test_gene_annotation_without_star_is_skipped() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs999999"), Some("DPYD"), None)];
        let a = analyze(&kb, &vs, "FLUOROURACIL").unwrap();
        assert!(a.detected_variants.is_empty());
    }

    #[test]
    fn test_record_gene_annotation_admits_curated_variant_of_other_gene() {
        // rs4244285 is curated for CYP2C19 but annotated as CYP2C9 here
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs4244285"), Some("CYP2C9"), None)];
        let a = analyze(&kb, &vs, "WARFARIN").unwrap();
        assert_eq!(a.detected_variants.len(), 1);
        assert_eq!(a.detected_variants[0].gene, "CYP2C19");
        assert_eq!(a.activity_score, 0.0);
    }

    #[test]
    fn test_more_than_two_alleles_truncate_diplotype() {
        let kb = KnowledgeBase::curated();
        let vs = [
            variant(Some("rs1800462"), Some("TPMT"), None),
            variant(Some("rs1800460"), Some("TPMT"), None),
            variant(Some("rs1142345"), Some("TPMT"), None),
        ];
        let a = analyze(&kb, &vs, "MERCAPTOPURINE").unwrap();
        assert_eq!(a.diplotype, "*2/*3B");
        assert_eq!(a.detected_variants.len(), 3);
        assert_eq!(a.activity_score, -2.0);
    }

    #[test]
    fn test_unmapped_risk_defaults_to_unknown() {
        let kb = KnowledgeBase::empty().with_drug("TESTDRUG", "CYP2D6", "test");
        let a = analyze(&kb, &[], "TESTDRUG").unwrap();
        assert_eq!(a.risk_label, RiskLabel::Unknown);
        assert_eq!(a.severity, Severity::Low);
        assert_eq!(a.confidence, 0.5);
    }

    #[test]
    fn test_deterministic() {
        let kb = KnowledgeBase::curated();
        let vs = [
            variant(Some("rs1799853"), Some("CYP2C9"), Some("*2")),
            variant(Some("rs28371686"), Some("CYP2C9"), Some("*5")),
        ];
        let a = analyze(&kb, &vs, "PHENYTOIN");
        let b = analyze(&kb, &vs, "PHENYTOIN");
        assert_eq!(a, b);
        assert_eq!(a.unwrap().activity_score, -0.25);
    }
}
