//! Curated tables, based on CPIC guideline recommendations.

use crate::types::{RiskLabel, Severity, VariantEffect};
use RiskLabel::{AdjustDosage, Ineffective, Safe, Toxic};
use VariantEffect::*;

/// rsid, gene, star allele, effect, activity impact.
pub(crate) const KNOWN_VARIANTS: &[(&str, &str, &str, VariantEffect, f64)] = &[
    // CYP2D6
    ("rs3892097",  "CYP2D6",  "*4",        LossOfFunction,         -1.0),
    ("rs35742686", "CYP2D6",  "*3",        LossOfFunction,         -1.0),
    ("rs5030655",  "CYP2D6",  "*6",        LossOfFunction,         -1.0),
    ("rs16947",    "CYP2D6",  "*2",        Normal,                  0.0),
    ("rs28371706", "CYP2D6",  "*41",       Decreased,              -0.5),
    ("rs1135840",  "CYP2D6",  "*10",       Decreased,              -0.5),
    // CYP2C19
    ("rs4244285",  "CYP2C19", "*2",        LossOfFunction,         -1.0),
    ("rs4986893",  "CYP2C19", "*3",        LossOfFunction,         -1.0),
    ("rs12248560", "CYP2C19", "*17",       Increased,               1.0),
    ("rs28399504", "CYP2C19", "*4",        LossOfFunction,         -1.0),
    // CYP2C9
    ("rs1799853",  "CYP2C9",  "*2",        Decreased,              -0.5),
    ("rs1057910",  "CYP2C9",  "*3",        SignificantlyDecreased, -1.0),
    ("rs28371686", "CYP2C9",  "*5",        Decreased,              -0.75),
    // SLCO1B1
    ("rs4149056",  "SLCO1B1", "*5",        DecreasedTransport,     -1.0),
    ("rs2306283",  "SLCO1B1", "*1B",       IncreasedTransport,      0.5),
    // TPMT
    ("rs1800462",  "TPMT",    "*2",        LossOfFunction,         -1.0),
    ("rs1800460",  "TPMT",    "*3B",       LossOfFunction,         -1.0),
    ("rs1142345",  "TPMT",    "*3C",       LossOfFunction,         -1.0),
    // DPYD
    ("rs3918290",  "DPYD",    "*2A",       LossOfFunction,         -1.0),
    ("rs55886062", "DPYD",    "*13",       LossOfFunction,         -1.0),
    ("rs67376798", "DPYD",    "c.2846A>T", Decreased,              -0.5),
];

/// Drug, primary gene, metabolic mechanism. Catalog order is preserved.
pub(crate) const DRUG_GENES: &[(&str, &str, &str)] = &[
    ("CODEINE",        "CYP2D6",  "prodrug activation to morphine via O-demethylation"),
    ("WARFARIN",       "CYP2C9",  "hepatic metabolism and S-warfarin clearance"),
    ("CLOPIDOGREL",    "CYP2C19", "prodrug activation to active thienopyridine metabolite"),
    ("SIMVASTATIN",    "SLCO1B1", "hepatic uptake transport via OATP1B1 transporter"),
    ("AZATHIOPRINE",   "TPMT",    "thiopurine methylation and inactivation"),
    ("FLUOROURACIL",   "DPYD",    "pyrimidine catabolism and 5-FU inactivation"),
    ("OMEPRAZOLE",     "CYP2C19", "Metabolism variability and clearance"),
    ("AMITRIPTYLINE",  "CYP2D6",  "Dose adjustment and metabolism"),
    ("PHENYTOIN",      "CYP2C9",  "Toxicity risk and hepatic clearance"),
    ("ATORVASTATIN",   "SLCO1B1", "Myopathy risk via OATP1B1 transport"),
    ("MERCAPTOPURINE", "TPMT",    "Severe toxicity via thiopurine methylation"),
    ("CAPECITABINE",   "DPYD",    "Fluoropyrimidine toxicity and catabolism"),
];

/// Risk per drug, columns in `Phenotype::CLASSIFIED` order: PM, IM, NM, RM, URM.
pub(crate) const DRUG_PHENOTYPE_RISKS: &[(&str, [RiskLabel; 5])] = &[
    ("CODEINE",        [Ineffective, AdjustDosage, Safe, Safe,         Toxic]),
    ("WARFARIN",       [Toxic,       AdjustDosage, Safe, Safe,         AdjustDosage]),
    ("CLOPIDOGREL",    [Ineffective, Ineffective,  Safe, Safe,         AdjustDosage]),
    ("SIMVASTATIN",    [Toxic,       AdjustDosage, Safe, Safe,         Safe]),
    ("AZATHIOPRINE",   [Toxic,       AdjustDosage, Safe, Safe,         AdjustDosage]),
    ("FLUOROURACIL",   [Toxic,       AdjustDosage, Safe, Safe,         AdjustDosage]),
    ("OMEPRAZOLE",     [Safe,        Safe,         Safe, Ineffective,  Ineffective]),
    ("AMITRIPTYLINE",  [Toxic,       AdjustDosage, Safe, AdjustDosage, Ineffective]),
    ("PHENYTOIN",      [Toxic,       AdjustDosage, Safe, Safe,         Safe]),
    ("ATORVASTATIN",   [Toxic,       AdjustDosage, Safe, Safe,         Safe]),
    ("MERCAPTOPURINE", [Toxic,       AdjustDosage, Safe, Safe,         AdjustDosage]),
    ("CAPECITABINE",   [Toxic,       AdjustDosage, Safe, Safe,         AdjustDosage]),
];

pub(crate) const SEVERITY: &[(RiskLabel, Severity)] = &[
    (Safe,               Severity::None),
    (AdjustDosage,       Severity::Moderate),
    (Toxic,              Severity::Critical),
    (Ineffective,        Severity::High),
    (RiskLabel::Unknown, Severity::Low),
];

pub(crate) const CONFIDENCE: &[(RiskLabel, f64)] = &[
    (Safe,               0.92),
    (AdjustDosage,       0.85),
    (Toxic,              0.90),
    (Ineffective,        0.88),
    (RiskLabel::Unknown, 0.40),
];
