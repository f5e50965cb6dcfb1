//! Suitability letter generation: file naming, print layout, HTML preview
//! and PDF rendering.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::suitability::SuitabilityFormState;
use crate::domain::types::TradeSide;

pub mod layout;
pub mod pdf;
pub mod preview;

pub use crate::models::config::FirmProfile;

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("failed to load font {path}: {message}")]
    Font { path: String, message: String },

    #[error("failed to render PDF: {0}")]
    Render(String),

    #[error("failed to render preview: {0}")]
    Template(String),

    #[error("letter generation was cancelled")]
    Cancelled,
}

impl From<tera::Error> for LetterError {
    fn from(err: tera::Error) -> Self {
        LetterError::Template(err.to_string())
    }
}

impl From<printpdf::Error> for LetterError {
    fn from(err: printpdf::Error) -> Self {
        LetterError::Render(err.to_string())
    }
}

const FORBIDDEN_FILE_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Deterministic download name for a letter issued on `date`, e.g.
/// `Jane Doe - Sale of Acme Corp 05-03-2025.pdf`.
pub fn file_name(form: &SuitabilityFormState, date: NaiveDate) -> String {
    let client_name = match form.client_name.trim() {
        "" => "Client",
        name => name,
    };
    let action = if form.recommendation() == Some(TradeSide::Sell) {
        "Sale"
    } else {
        "Purchase"
    };
    let assets = form.asset_names();
    let assets = if assets.is_empty() {
        "Stock".to_string()
    } else {
        assets.join(", ")
    };

    format!(
        "{client_name} - {action} of {assets} {}.pdf",
        date.format("%d-%m-%Y")
    )
    .chars()
    .filter(|c| !FORBIDDEN_FILE_NAME_CHARS.contains(c))
    .collect()
}
