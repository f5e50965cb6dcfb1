//! DTOs used by the settings screen.

use serde::Serialize;

use crate::models::config::{FirmProfile, Platform};

/// Read-only facts about the running application.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInfo {
    pub version: &'static str,
    pub platform: Platform,
    /// Location of the SQLite database; absent on the web platform.
    pub database: Option<String>,
    /// Folder generated letters are written to; absent on the web platform.
    pub documents_folder: Option<String>,
    pub firm: FirmProfile,
}
