//! pharmagen-kb — Curated pharmacogenomics knowledge base.
//!
//! Static reference data covering six pharmacogenes
//! (CYP2D6, CYP2C19, CYP2C9, SLCO1B1, TPMT, DPYD):
//! - known variant → star allele, functional effect, activity impact
//! - drug → primary gene and mechanism
//! - (drug, phenotype) → risk label
//! - risk label → severity tier and confidence
//! - (drug, risk label) → rule-based clinical recommendation

pub mod types;
pub mod knowledge_base;
pub mod sample;
mod curated;
mod recommendations;

pub use knowledge_base::{DrugProfile, KnowledgeBase, KnownVariant};
pub use recommendations::GENERIC_RECOMMENDATION;
pub use types::{Phenotype, RiskLabel, Severity, VariantEffect};
