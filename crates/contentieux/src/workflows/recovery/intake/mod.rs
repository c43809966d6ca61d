//! CSV intake for collection-workflow payment exports.

mod parser;

use std::io::Read;
use std::path::Path;

use super::domain::Payment;

/// Reads payment exports into domain records.
pub struct PaymentCsvImporter;

impl PaymentCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Payment>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Payment>, ImportError> {
        parser::parse_payments(reader)
    }
}

/// Import failures. Amount problems are line-numbered so operators can fix
/// the export; a payment without a parseable amount never reaches the
/// distribution engine.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read payment export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid payment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: payment amount is missing")]
    MissingAmount { line: usize },
    #[error("line {line}: '{value}' is not a valid amount")]
    InvalidAmount { line: usize, value: String },
    #[error("line {line}: '{value}' is not a valid date")]
    InvalidDate { line: usize, value: String },
}
