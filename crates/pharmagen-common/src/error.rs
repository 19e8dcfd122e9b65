use thiserror::Error;

/// Reasons a VCF upload is rejected by the pre-flight gate.
/// Checked in declaration order; the first failing check wins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File is empty.")]
    Empty,

    #[error("Missing VCF header (##fileformat=VCF). This may not be a valid VCF file.")]
    MissingHeader,

    #[error("Missing column header line (#CHROM). File appears malformed.")]
    MissingColumnHeader,

    #[error("No variant records found in this VCF file.")]
    NoRecords,
}

impl ValidationError {
    /// Short machine-readable reason code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationError::Empty               => "empty",
            ValidationError::MissingHeader       => "missing header",
            ValidationError::MissingColumnHeader => "missing column header",
            ValidationError::NoRecords           => "no records",
        }
    }
}

#[derive(Debug, Error)]
pub enum PharmagenError {
    #[error("Invalid VCF: {0}")]
    Validation(#[from] ValidationError),

    #[error("\"{drug}\" is not supported. Supported drugs: {supported}.")]
    UnsupportedDrug { drug: String, supported: String },

    #[error("Please select or enter at least one drug to analyze.")]
    NoDrugsRequested,
}

pub type Result<T> = std::result::Result<T, PharmagenError>;
