//! Application services orchestrating stores, forms, letters and documents.

use thiserror::Error;

use crate::domain::suitability::FormErrors;
use crate::forms::RowError;
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod documents;
pub mod import;
pub mod settings;
pub mod suitability;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    /// The suitability form failed validation; carries the full error tree.
    #[error("the form has validation errors")]
    Validation(Box<FormErrors>),

    /// Rows of an uploaded CSV that could not be read.
    #[error("{} rows could not be imported", .0.len())]
    Import(Vec<RowError>),

    /// The user did not confirm a destructive action; carries the prompt.
    #[error("{0}")]
    Declined(String),

    #[error("{0}")]
    TypeConstraint(String),

    #[error("the operation was cancelled")]
    Cancelled,

    /// The capability is not offered on this platform.
    #[error("{0}")]
    Unavailable(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
