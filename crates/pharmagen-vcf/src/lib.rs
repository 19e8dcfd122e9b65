//! pharmagen-vcf — Variant Call Format (v4.x) reader for single-sample
//! pharmacogenomic panels.
//!
//! - Tolerant line-oriented parsing: malformed rows are skipped, never fatal
//! - Patient ID from the sample column of the `#CHROM` header
//! - rsID resolution from the ID column or the INFO `RS` tag
//! - Pre-flight validation used before any analysis runs

pub mod models;
pub mod parser;
pub mod validate;

pub use models::{InfoValue, ParsedVcf, VariantRecord, VcfMetadata};
pub use parser::{parse, parse_info_field};
pub use validate::validate;
