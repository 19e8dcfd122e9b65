//! Batch prompt: one request describing every supported drug for a patient.

use pharmagen_engine::DrugAnalysis;

pub const SYSTEM_PROMPT: &str =
    "You are a clinical pharmacogenomics specialist generating a report for a physician.";

const NO_VARIANTS: &str = "None detected — wild-type assumed";

/// Expected response shape, shown to the model verbatim.
const RESPONSE_SHAPE: &str = r#"{
  "CODEINE": {
    "summary": "2-3 sentence clinical summary...",
    "mechanism_explanation": "...",
    "clinical_recommendation": "...",
    "alternative_drugs": ["drug1", "drug2"],
    "monitoring_parameters": ["param1"],
    "cpic_guideline_reference": "..."
  },
  "WARFARIN": {
    ...
  }
}"#;

/// One `DRUG:` block per analysis.
pub fn drug_section(analysis: &DrugAnalysis) -> String {
    let variants = if analysis.detected_variants.is_empty() {
        NO_VARIANTS.to_string()
    } else {
        analysis
            .detected_variants
            .iter()
            .map(|v| format!("{} ({}, {})", v.rsid, v.star_allele, v.effect.as_str().replace('_', " ")))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "DRUG: {drug}\n\
         - Primary Gene: {gene}\n\
         - Diplotype: {diplotype}\n\
         - Phenotype: {code} ({label})\n\
         - Risk Assessment: {risk}\n\
         - Detected Variants: {variants}\n\
         - Mechanism: {mechanism}",
        drug = analysis.drug,
        gene = analysis.gene,
        diplotype = analysis.diplotype,
        code = analysis.phenotype.code(),
        label = analysis.phenotype_label,
        risk = analysis.risk_label.as_str(),
        mechanism = analysis.mechanism,
    )
}

/// User prompt for the whole batch.
pub fn build_batch_prompt(patient_id: &str, analyses: &[DrugAnalysis]) -> String {
    let data = analyses
        .iter()
        .map(drug_section)
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "PATIENT ID: {patient_id}\n\n\
         DATA FOR ANALYSIS:\n{data}\n\n\
         Output exactly a single JSON object where the keys are the uppercase DRUG NAMES, \
         and the values are objects containing the clinical explanation for that specific drug.\n\n\
         Structure the JSON exactly like this:\n{RESPONSE_SHAPE}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pharmagen_engine::analyze;
    use pharmagen_kb::KnowledgeBase;
    use pharmagen_test_utils::fixtures::variant;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_drug_section_with_variants() {
        let kb = KnowledgeBase::curated();
        let vs = [variant(Some("rs3892097"), Some("CYP2D6"), Some("*4"))];
        let a = analyze(&kb, &vs, "CODEINE").unwrap();
        assert_eq!(
            drug_section(&a),
            "DRUG: CODEINE\n\
             - Primary Gene: CYP2D6\n\
             - Diplotype: *4/*1\n\
             - Phenotype: IM (Intermediate Metabolizer)\n\
             - Risk Assessment: Adjust Dosage\n\
             - Detected Variants: rs3892097 (*4, loss of function)\n\
             - Mechanism: prodrug activation to morphine via O-demethylation"
        );
    }

    #[test]
    fn test_drug_section_wild_type() {
        let kb = KnowledgeBase::curated();
        let a = analyze(&kb, &[], "WARFARIN").unwrap();
        assert!(drug_section(&a).contains("- Detected Variants: None detected — wild-type assumed"));
    }

    #[test]
    fn test_batch_prompt_lists_every_drug() {
        let kb = KnowledgeBase::curated();
        let analyses: Vec<_> = ["CODEINE", "WARFARIN"]
            .iter()
            .filter_map(|d| analyze(&kb, &[], d))
            .collect();
        let prompt = build_batch_prompt("PATIENT_DEMO01", &analyses);
        assert!(prompt.starts_with("PATIENT ID: PATIENT_DEMO01\n"));
        assert!(prompt.contains("DRUG: CODEINE"));
        assert!(prompt.contains("DRUG: WARFARIN"));
        assert!(prompt.contains("\"cpic_guideline_reference\""));
    }
}
