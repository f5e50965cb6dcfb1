//! DTOs returned by client mutations.

use serde::Serialize;

/// Outcome of a CSV import.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
}
