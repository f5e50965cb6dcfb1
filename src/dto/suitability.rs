//! DTOs produced by the suitability letter workflow.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::suitability::FormErrors;

/// Result of validating a suitability form before saving.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: FormErrors,
    /// 1-based page the editor should show: the first trade with an error.
    pub page: usize,
}

/// Where a generated letter went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LetterDelivery {
    /// Web platform: the caller hands the bytes to the browser.
    Download { file_name: String, bytes: Vec<u8> },
    /// Desktop platform: the letter was written to the documents folder.
    Saved { file_name: String, path: PathBuf },
}

/// JSON body describing a letter saved on the desktop.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedLetter {
    pub file_name: String,
    pub path: String,
}
