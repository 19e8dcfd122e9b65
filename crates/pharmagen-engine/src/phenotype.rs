//! Activity score → phenotype classification and diplotype notation.
//!
//! Activity score bands (adapted from CPIC guidelines), first match wins:
//!  ≥ 2.0  → URM (Ultrarapid Metabolizer)
//!  ≥ 1.5  → RM  (Rapid Metabolizer)
//!  ≥ 0.5  → NM  (Normal Metabolizer)
//!  > -0.5 → IM  (Intermediate Metabolizer)
//!  else   → PM  (Poor Metabolizer)

use pharmagen_kb::Phenotype;

use crate::models::DetectedVariant;

/// Two fully functional alleles.
pub const BASELINE_ACTIVITY_SCORE: f64 = 1.0;

/// Wild-type allele used to fill missing diplotype slots.
pub const WILD_TYPE_ALLELE: &str = "*1";

pub fn classify_activity_score(score: f64) -> Phenotype {
    if score >= 2.0 {
        Phenotype::Ultrarapid
    } else if score >= 1.5 {
        Phenotype::Rapid
    } else if score >= 0.5 {
        Phenotype::Normal
    } else if score > -0.5 {
        Phenotype::Intermediate
    } else {
        Phenotype::Poor
    }
}

/// Diplotype from detected star alleles in detection order.
///
/// Only the first two alleles are used; later ones stay in the detected
/// variant list but do not change the notation.
pub fn build_diplotype(detected: &[DetectedVariant]) -> String {
    let mut stars = detected
        .iter()
        .map(|v| v.star_allele.as_str())
        .filter(|s| !s.is_empty());

    match (stars.next(), stars.next()) {
        (None, _)                   => format!("{WILD_TYPE_ALLELE}/{WILD_TYPE_ALLELE}"),
        (Some(first), None)         => format!("{first}/{WILD_TYPE_ALLELE}"),
        (Some(first), Some(second)) => format!("{first}/{second}"),
    }
}
