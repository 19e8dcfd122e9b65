//! pharmagen-engine — Pharmacogenomic analysis engine.
//!
//! - `analyzer`  — per-drug activity scoring, phenotype and risk resolution
//! - `phenotype` — activity-score bands and diplotype construction
//! - `report`    — merges an analysis with optional narrative text
//! - `narrative` — the seam to the external narrative generator
//! - `pipeline`  — validate → parse → analyse all drugs → one narrative call → reports

pub mod models;
pub mod phenotype;
pub mod analyzer;
pub mod narrative;
pub mod report;
pub mod pipeline;

pub use analyzer::analyze;
pub use models::{DetectedVariant, DrugAnalysis};
pub use narrative::{NarrativeBatch, NarrativeBundle, NarrativeSource, NoNarrative};
pub use pipeline::{parse_drug_list, run_batch, BatchReport, DrugOutcome};
pub use report::{assemble, Report};
