//! Input parsing and validation for client records, CSV imports and
//! suitability letters.

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

pub mod client;
pub mod import;
pub mod suitability;

/// A CSV data row that could not be turned into a client.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct RowError {
    /// 1-based data row number, header excluded.
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid client id")]
    InvalidClientId,

    #[error("first or last name is required")]
    InvalidName,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid phone number")]
    InvalidPhoneNumber,

    #[error("could not read CSV: {0}")]
    Csv(String),

    #[error("No valid clients found")]
    NoClients,

    #[error("{} rows could not be imported", .0.len())]
    Rows(Vec<RowError>),
}

impl From<csv::Error> for FormError {
    fn from(err: csv::Error) -> Self {
        FormError::Csv(err.to_string())
    }
}

impl From<std::io::Error> for FormError {
    fn from(err: std::io::Error) -> Self {
        FormError::Csv(err.to_string())
    }
}
