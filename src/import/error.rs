use thiserror::Error;

use super::Field;
use crate::ir::ValidationError;

/// Why a record that looked like a sale or a payment couldn't be imported. Aborts the whole batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("Row {row}, field {field}: {source}")]
    InvalidField {
        row: usize,
        field: Field,
        #[source]
        source: ValidationError,
    },

    #[error("Row {row}, field {field}: value is missing")]
    MissingField { row: usize, field: Field },

    #[error("Row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: ValidationError,
    },
}

impl ImportError {
    pub fn row(&self) -> usize {
        match self {
            ImportError::InvalidField { row, .. }
            | ImportError::MissingField { row, .. }
            | ImportError::InvalidRecord { row, .. } => *row,
        }
    }
}
