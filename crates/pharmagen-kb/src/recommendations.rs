//! Rule-based clinical recommendations, used when no narrative text is available.

/// Fallback for (drug, risk label) pairs with no curated text.
pub const GENERIC_RECOMMENDATION: &str =
    "Consult a clinical pharmacist or pharmacogenomics specialist for guidance.";

/// Drug, then texts for Safe, Adjust Dosage, Toxic, Ineffective.
pub(crate) const RECOMMENDATIONS: &[(&str, [&str; 4])] = &[
    ("CODEINE", [
        "Standard codeine dosing is appropriate. Monitor for adequate analgesia.",
        "Reduce codeine dose by 25–50%. Consider tramadol as an alternative.",
        "AVOID CODEINE — risk of life-threatening respiratory depression. Use morphine or hydromorphone at reduced doses.",
        "Codeine will not be activated to morphine. Use an alternative opioid (e.g., morphine, oxycodone).",
    ]),
    ("WARFARIN", [
        "Standard warfarin initiation protocols apply. Use clinical algorithms for starting dose.",
        "Reduce starting warfarin dose by 25–50%. Increase INR monitoring frequency during initiation.",
        "Significantly reduce warfarin dose (>50%). Intensive INR monitoring required. Consider direct oral anticoagulants.",
        "Standard dosing may be insufficient; monitor INR closely and titrate accordingly.",
    ]),
    ("CLOPIDOGREL", [
        "Standard clopidogrel dosing (75 mg/day) is appropriate.",
        "Consider alternative antiplatelet therapy (prasugrel or ticagrelor).",
        "Standard dosing; monitor for excessive bleeding risk.",
        "Clopidogrel is likely ineffective. Switch to prasugrel or ticagrelor per CPIC guidelines.",
    ]),
    ("SIMVASTATIN", [
        "Standard simvastatin dosing is appropriate.",
        "Consider lower simvastatin dose (≤20 mg/day) or switch to pravastatin/rosuvastatin.",
        "HIGH RISK of myopathy/rhabdomyolysis. Use an alternative statin (pravastatin or rosuvastatin).",
        "Standard dosing. Monitor lipid panel at 6–8 weeks.",
    ]),
    ("AZATHIOPRINE", [
        "Standard azathioprine dosing is appropriate. Monitor CBC periodically.",
        "Reduce azathioprine dose by 30–70%. Monitor CBC weekly for first month.",
        "CONTRAINDICATED — severe potentially fatal myelosuppression risk. Use alternative immunosuppressant.",
        "May require dose escalation. Monitor clinical response and CBC.",
    ]),
    ("FLUOROURACIL", [
        "Standard 5-FU/capecitabine dosing is appropriate.",
        "Reduce 5-FU/capecitabine dose by 25–50%. Monitor closely for toxicity.",
        "CONTRAINDICATED — life-threatening toxicity risk (mucositis, myelosuppression, neurotoxicity). Use alternative chemotherapy.",
        "Standard dosing. Monitor for adequate treatment response.",
    ]),
    ("OMEPRAZOLE", [
        "Standard omeprazole dosing is appropriate.",
        "Standard dosing is generally safe, but monitor clinical response.",
        "Monitor for potential side effects; consider slight dose reduction if symptoms occur.",
        "Increase starting dose by 100-200% or consider an alternative PPI not primarily metabolized by CYP2C19.",
    ]),
    ("AMITRIPTYLINE", [
        "Standard amitriptyline dosing is appropriate.",
        "Consider a 25% dose reduction from the standard starting dose. Monitor closely.",
        "Avoid amitriptyline due to high risk of adverse cardiovascular and anticholinergic effects.",
        "Consider alternative drug; standard doses may fail to achieve therapeutic concentrations.",
    ]),
    ("PHENYTOIN", [
        "Standard phenytoin maintenance dosing is appropriate.",
        "Reduce maintenance dose by 25-50%. Monitor serum concentrations closely.",
        "Significant dose reduction (50%+) required. High risk of severe dose-related neurotoxicity.",
        "Standard dosing; monitor serum levels to ensure therapeutic target is reached.",
    ]),
    ("ATORVASTATIN", [
        "Standard atorvastatin dosing is appropriate.",
        "Consider lower starting dose (≤20 mg). Monitor for muscle pain.",
        "High risk of statin-associated muscle symptoms (SAMS). Use an alternative statin like rosuvastatin.",
        "Standard dosing; monitor lipid panel for therapeutic effect.",
    ]),
    ("MERCAPTOPURINE", [
        "Standard mercaptopurine dosing is appropriate.",
        "Reduce dose significantly and monitor complete blood count (CBC) closely.",
        "CONTRAINDICATED. Severe risk of life-threatening myelosuppression.",
        "Standard dosing; monitor response and adjust as necessary.",
    ]),
    ("CAPECITABINE", [
        "Standard capecitabine dosing is appropriate.",
        "Reduce dose by 50% and monitor closely for severe toxicity.",
        "CONTRAINDICATED. High risk of severe or fatal toxicity (mucositis, diarrhea, myelosuppression).",
        "Standard dosing; monitor for adequate treatment response.",
    ]),
];
