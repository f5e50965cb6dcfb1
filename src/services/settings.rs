//! Read-only application facts for the settings screen.

use crate::dto::settings::SettingsInfo;
use crate::models::config::{Platform, ServerConfig};

/// Describes the running application. Storage locations are only reported
/// on the desktop platform.
pub fn app_settings(config: &ServerConfig) -> SettingsInfo {
    let desktop = config.platform == Platform::Desktop;

    SettingsInfo {
        version: env!("CARGO_PKG_VERSION"),
        platform: config.platform,
        database: desktop.then(|| config.database_url.clone()),
        documents_folder: desktop.then(|| {
            config
                .documents_root()
                .join(&config.letters_folder)
                .display()
                .to_string()
        }),
        firm: config.firm.clone(),
    }
}
