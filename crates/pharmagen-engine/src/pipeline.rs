//! End-to-end batch: validate → parse → analyse every drug → one narrative
//! call → one report per supported drug.

use pharmagen_common::{PharmagenError, Result};
use pharmagen_kb::KnowledgeBase;
use pharmagen_vcf::{parse, validate};
use serde::{Deserialize, Serialize};

use crate::analyzer::analyze;
use crate::models::DrugAnalysis;
use crate::narrative::{NarrativeBatch, NarrativeSource};
use crate::report::{assemble, Report};

/// Split a free-text drug list on commas, trim, uppercase, drop blanks.
/// e.g. `"codeine, Warfarin,, "` → `["CODEINE", "WARFARIN"]`
pub fn parse_drug_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|d| d.trim().to_uppercase())
        .filter(|d| !d.is_empty())
        .collect()
}

/// One entry of a batch, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrugOutcome {
    Report(Box<Report>),
    Unsupported { drug: String, error: String },
}

impl DrugOutcome {
    pub fn drug(&self) -> &str {
        match self {
            DrugOutcome::Report(r) => &r.drug,
            DrugOutcome::Unsupported { drug, .. } => drug,
        }
    }

    pub fn as_report(&self) -> Option<&Report> {
        match self {
            DrugOutcome::Report(r) => Some(r),
            DrugOutcome::Unsupported { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub patient_id: String,
    /// Whether the narrative collaborator answered for this batch.
    pub narrative_available: bool,
    pub outcomes: Vec<DrugOutcome>,
}

impl BatchReport {
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.outcomes.iter().filter_map(DrugOutcome::as_report)
    }

    /// `(drug, error)` for every unsupported request.
    pub fn unsupported(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match o {
            DrugOutcome::Unsupported { drug, error } => Some((drug.as_str(), error.as_str())),
            DrugOutcome::Report(_) => None,
        })
    }
}

/// Run one batch for a single VCF upload.
///
/// Fails only on an empty drug list or a rejected upload. Unsupported drugs
/// become [`DrugOutcome::Unsupported`] entries; a failing narrative source
/// downgrades the whole batch to rule-based text.
pub async fn run_batch(
    kb: &KnowledgeBase,
    vcf_text: &str,
    drugs: &[String],
    narrative: &dyn NarrativeSource,
) -> Result<BatchReport> {
    if drugs.iter().all(|d| d.trim().is_empty()) {
        return Err(PharmagenError::NoDrugsRequested);
    }

    validate(vcf_text)?;
    let parsed = parse(vcf_text);
    let total_variants = parsed.variants.len();

    // Analyse first; a slot is None for an unsupported drug
    let analyses: Vec<(String, Option<DrugAnalysis>)> = drugs
        .iter()
        .map(|d| d.trim())
        .filter(|d| !d.is_empty())
        .map(|d| {
            let analysis = analyze(kb, &parsed.variants, d);
            if let Some(a) = &analysis {
                tracing::info!(
                    drug = %a.drug,
                    gene = %a.gene,
                    diplotype = %a.diplotype,
                    phenotype = a.phenotype.code(),
                    risk = a.risk_label.as_str(),
                    "Drug analysis complete"
                );
            }
            (d.to_uppercase(), analysis)
        })
        .collect();

    let supported: Vec<DrugAnalysis> = analyses
        .iter()
        .filter_map(|(_, a)| a.clone())
        .collect();

    let batch = if supported.is_empty() {
        None
    } else {
        fetch_narrative(narrative, &parsed.patient_id, &supported).await
    };

    let outcomes = analyses
        .into_iter()
        .map(|(drug, analysis)| match analysis {
            Some(a) => {
                let bundle = batch.as_ref().and_then(|b| b.get(&a.drug));
                let report = assemble(kb, &parsed.patient_id, &a.drug, &a, bundle, total_variants);
                DrugOutcome::Report(Box::new(report))
            }
            None => {
                let error = PharmagenError::UnsupportedDrug {
                    drug: drug.clone(),
                    supported: kb.supported_drug_list(),
                }
                .to_string();
                DrugOutcome::Unsupported { drug, error }
            }
        })
        .collect::<Vec<_>>();

    let report = BatchReport {
        patient_id: parsed.patient_id,
        narrative_available: batch.is_some(),
        outcomes,
    };

    tracing::info!(
        patient_id = %report.patient_id,
        variants = total_variants,
        reports = report.reports().count(),
        unsupported = report.unsupported().count(),
        narrative = report.narrative_available,
        "Batch complete"
    );

    Ok(report)
}

async fn fetch_narrative(
    source: &dyn NarrativeSource,
    patient_id: &str,
    analyses: &[DrugAnalysis],
) -> Option<NarrativeBatch> {
    match source.generate(patient_id, analyses).await {
        Ok(batch) => batch,
        Err(e) => {
            tracing::warn!(
                source = source.name(),
                error = %e,
                "Narrative generation failed; using rule-based text"
            );
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::narrative::{MockNarrativeSource, NarrativeBundle, NoNarrative};
    use pharmagen_common::ValidationError;
    use pharmagen_kb::sample::SAMPLE_VCF;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_drug_list() {
        assert_eq!(
            parse_drug_list(" codeine, Warfarin ,, "),
            vec!["CODEINE".to_string(), "WARFARIN".to_string()]
        );
        assert!(parse_drug_list(" , ").is_empty());
        assert!(parse_drug_list("").is_empty());
    }

    #[tokio::test]
    async fn test_empty_drug_list_rejected() {
        let kb = KnowledgeBase::curated();
        let err = run_batch(&kb, SAMPLE_VCF, &[], &NoNarrative).await.unwrap_err();
        assert!(matches!(err, PharmagenError::NoDrugsRequested));
    }

    #[tokio::test]
    async fn test_invalid_vcf_rejected_before_narrative() {
        let kb = KnowledgeBase::curated();
        let mock = MockNarrativeSource::new();
        let err = run_batch(&kb, "", &["CODEINE".to_string()], &mock).await.unwrap_err();
        assert!(matches!(err, PharmagenError::Validation(ValidationError::Empty)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unsupported_drug_kept_in_request_order() {
        let kb = KnowledgeBase::curated();
        let drugs = parse_drug_list("ASPIRIN, codeine");
        let batch = run_batch(&kb, SAMPLE_VCF, &drugs, &NoNarrative).await.unwrap();

        assert_eq!(batch.outcomes.len(), 2);
        assert_eq!(batch.outcomes[0].drug(), "ASPIRIN");
        assert_eq!(batch.outcomes[1].drug(), "CODEINE");

        let (drug, error) = batch.unsupported().next().unwrap();
        assert_eq!(drug, "ASPIRIN");
        assert!(error.starts_with("\"ASPIRIN\" is not supported. Supported drugs: CODEINE, WARFARIN"));
        assert!(!batch.narrative_available);
    }

    #[tokio::test]
    async fn test_only_unsupported_skips_narrative() {
        let kb = KnowledgeBase::curated();
        let mock = MockNarrativeSource::new();
        let batch = run_batch(&kb, SAMPLE_VCF, &["ASPIRIN".to_string()], &mock).await.unwrap();
        assert_eq!(mock.call_count(), 0);
        assert_eq!(batch.reports().count(), 0);
    }

    #[tokio::test]
    async fn test_narrative_applied_per_drug() {
        let kb = KnowledgeBase::curated();
        let mock = MockNarrativeSource::new().with(
            "CODEINE",
            NarrativeBundle { summary: Some("Reduced activation.".to_string()), ..Default::default() },
        );
        let drugs = parse_drug_list("CODEINE, WARFARIN");
        let batch = run_batch(&kb, SAMPLE_VCF, &drugs, &mock).await.unwrap();

        assert_eq!(mock.call_count(), 1);
        assert!(batch.narrative_available);
        let reports: Vec<_> = batch.reports().collect();
        assert_eq!(reports[0].llm_generated_explanation.summary, "Reduced activation.");
        // No bundle for WARFARIN: rule-based text
        assert_eq!(reports[1].llm_generated_explanation.summary, "");
        assert_eq!(
            reports[1].clinical_recommendation.cpic_guideline,
            "Guideline reference for WARFARIN"
        );
    }

    #[tokio::test]
    async fn test_unsupported_entry_json_shape() {
        let kb = KnowledgeBase::curated();
        let batch = run_batch(&kb, SAMPLE_VCF, &["ASPIRIN".to_string()], &NoNarrative).await.unwrap();
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["patient_id"], "PATIENT_DEMO01");
        assert_eq!(json["outcomes"][0]["drug"], "ASPIRIN");
        assert!(json["outcomes"][0]["error"].is_string());
    }
}
