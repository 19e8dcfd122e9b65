//! Record builders and VCF text fixtures.

use std::collections::BTreeMap;
use std::sync::Once;

use pharmagen_vcf::{InfoValue, VariantRecord};

pub use pharmagen_kb::sample::{SAMPLE_DRUGS, SAMPLE_VCF};

/// Header used by [`vcf_with_rows`]; the sample column is `TEST_PATIENT`.
pub const TEST_HEADER: &str = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tTEST_PATIENT";

/// A parsed record with the given annotations and placeholder coordinates.
pub fn variant(rsid: Option<&str>, gene: Option<&str>, star: Option<&str>) -> VariantRecord {
    let mut info = BTreeMap::new();
    if let Some(g) = gene {
        info.insert("GENE".to_string(), InfoValue::Value(g.to_string()));
    }
    if let Some(s) = star {
        info.insert("STAR".to_string(), InfoValue::Value(s.to_string()));
    }
    VariantRecord {
        chrom: "chr1".to_string(),
        pos: "1000".to_string(),
        rsid: rsid.map(str::to_string),
        reference: "A".to_string(),
        alternate: "G".to_string(),
        qual: "100".to_string(),
        filter: "PASS".to_string(),
        gene: gene.map(str::to_string),
        star: star.map(str::to_string),
        genotype: Some("0/1".to_string()),
        info,
    }
}

/// VCF text with [`TEST_HEADER`] followed by `rows` (tab-separated data lines).
pub fn vcf_with_rows(rows: &[&str]) -> String {
    let mut text = TEST_HEADER.to_string();
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text
}

/// A data row for `rsid` annotated with gene and star allele.
pub fn row(chrom: &str, pos: u64, rsid: &str, gene: &str, star: &str) -> String {
    format!("{chrom}\t{pos}\t{rsid}\tC\tT\t100\tPASS\tGENE={gene};STAR={star}\tGT\t0/1")
}

/// Install a test log subscriber once per process; honours `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vcf_with_rows_parses() {
        let r = row("chr22", 42522613, "rs3892097", "CYP2D6", "*4");
        let text = vcf_with_rows(&[&r]);
        let parsed = pharmagen_vcf::parse(&text);
        assert_eq!(parsed.patient_id, "TEST_PATIENT");
        assert_eq!(parsed.variants.len(), 1);
        assert_eq!(parsed.variants[0].star.as_deref(), Some("*4"));
    }

    #[test]
    fn test_variant_builder() {
        let v = variant(Some("rs1"), Some("TPMT"), None);
        assert_eq!(v.gene.as_deref(), Some("TPMT"));
        assert!(v.star.is_none());
        assert!(v.info.contains_key("GENE"));
    }
}
