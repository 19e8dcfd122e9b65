//! Line-oriented VCF parser.
//!
//! Never fails on malformed content: rows with fewer than 8 columns and
//! rows without an rsID or gene annotation are dropped silently.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use rand::distributions::Alphanumeric;
use rand::Rng;
use regex::Regex;

use crate::models::{InfoValue, ParsedVcf, VariantRecord, VcfMetadata};

/// Minimum columns in a data row: CHROM POS ID REF ALT QUAL FILTER INFO.
const MIN_DATA_COLUMNS: usize = 8;
/// 0-based index of the first sample column.
const SAMPLE_COLUMN: usize = 9;
const PATIENT_ID_PREFIX: &str = "PATIENT_";
const PATIENT_ID_SUFFIX_LEN: usize = 5;

/// Parse the INFO column into a key → value map.
/// e.g. `GENE=CYP2D6;STAR=*4;RS=3892097` → `{GENE: CYP2D6, STAR: *4, RS: 3892097}`
pub fn parse_info_field(info: &str) -> BTreeMap<String, InfoValue> {
    let mut map = BTreeMap::new();
    for field in info.split(';') {
        let field = field.trim();
        if field.is_empty() || field == "." {
            continue;
        }
        match field.split_once('=') {
            Some((key, value)) => {
                map.insert(key.to_string(), InfoValue::Value(value.to_string()));
            }
            None => {
                map.insert(field.to_string(), InfoValue::Flag(true));
            }
        }
    }
    map
}

/// Parse VCF text into a patient id and its annotated variant records.
pub fn parse(text: &str) -> ParsedVcf {
    let mut variants = Vec::new();
    let mut metadata = VcfMetadata::default();
    let mut patient_id: Option<String> = None;
    let mut skipped_malformed = 0usize;
    let mut skipped_unannotated = 0usize;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        // Meta-information lines
        if line.starts_with("##") {
            if let Some(format) = line.strip_prefix("##fileformat=") {
                metadata.file_format = Some(format.to_string());
            }
            continue;
        }

        // Column header: the sample name becomes the patient id
        if line.starts_with("#CHROM") {
            let cols: Vec<&str> = line.split('\t').collect();
            if let Some(sample) = cols.get(SAMPLE_COLUMN).map(|s| s.trim()) {
                if !sample.is_empty() {
                    patient_id = Some(sample.to_string());
                }
            }
            continue;
        }

        // Data lines
        let cols: Vec<&str> = line.split('\t').collect();
        if cols.len() < MIN_DATA_COLUMNS {
            skipped_malformed += 1;
            continue;
        }

        match parse_record(&cols) {
            Some(record) => variants.push(record),
            None => skipped_unannotated += 1,
        }
    }

    let patient_id = patient_id.unwrap_or_else(generate_patient_id);

    tracing::debug!(
        patient_id = %patient_id,
        records = variants.len(),
        skipped_malformed,
        skipped_unannotated,
        "VCF parsed"
    );

    ParsedVcf { patient_id, variants, metadata }
}

fn parse_record(cols: &[&str]) -> Option<VariantRecord> {
    let info = parse_info_field(cols[7]);

    let rsid = resolve_rsid(cols[2], &info);
    let gene = info_text(&info, "GENE");
    let star = info_text(&info, "STAR");

    // Only keep rows with some pharmacogenomic annotation
    if rsid.is_none() && gene.is_none() {
        return None;
    }

    let genotype = cols
        .get(SAMPLE_COLUMN)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(VariantRecord {
        chrom: cols[0].to_string(),
        pos: cols[1].to_string(),
        rsid,
        reference: cols[3].to_string(),
        alternate: cols[4].to_string(),
        qual: cols[5].to_string(),
        filter: cols[6].to_string(),
        gene,
        star,
        genotype,
        info,
    })
}

/// rsID from the ID column when canonical, else rebuilt from INFO `RS`.
fn resolve_rsid(id: &str, info: &BTreeMap<String, InfoValue>) -> Option<String> {
    let id = id.trim();
    if rsid_regex().is_match(id) {
        return Some(id.to_string());
    }
    info_text(info, "RS").map(|rs| format!("rs{rs}"))
}

fn info_text(info: &BTreeMap<String, InfoValue>, key: &str) -> Option<String> {
    info.get(key)
        .and_then(InfoValue::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn rsid_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^rs\d+$").expect("static rsid pattern"))
}

fn generate_patient_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(PATIENT_ID_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect();
    format!("{PATIENT_ID_PREFIX}{suffix}")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
