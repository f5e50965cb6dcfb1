use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A generated letter found in the documents folder.
///
/// Derived on every listing; never persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileData {
    pub name: String,
    pub created: DateTime<Utc>,
}
