//! Pre-flight gate run on uploaded text before any parsing or analysis.

use pharmagen_common::ValidationError;

const FILE_FORMAT_MARKER: &str = "##fileformat=VCF";
const COLUMN_HEADER_MARKER: &str = "#CHROM";

/// Check that `text` looks like a VCF with at least one data row.
/// Pure and idempotent; the first failing check is reported.
pub fn validate(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if !text.contains(FILE_FORMAT_MARKER) {
        return Err(ValidationError::MissingHeader);
    }
    if !text.contains(COLUMN_HEADER_MARKER) {
        return Err(ValidationError::MissingColumnHeader);
    }
    let has_records = text
        .lines()
        .any(|l| !l.starts_with('#') && !l.trim().is_empty());
    if !has_records {
        return Err(ValidationError::NoRecords);
    }
    Ok(())
}
