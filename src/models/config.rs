//! Configuration model loaded from external sources.

use std::env;
use std::fmt;
use std::path::PathBuf;

use config::{Config, ConfigError};
use serde::{Deserialize, Serialize};

/// Where the application runs. Decides which capabilities are available.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Local file system and SQLite store are reachable.
    #[default]
    Desktop,
    /// Letters are downloaded; no document folder.
    Web,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Platform::Desktop => "desktop",
            Platform::Web => "web",
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
/// Optional TrueType fonts for letters. Empty paths use the built-in Helvetica.
pub struct FontConfig {
    #[serde(default)]
    pub regular: String,
    #[serde(default)]
    pub bold: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
/// Firm identity printed on letters.
pub struct FirmProfile {
    pub name: String,
    pub contact_phone: String,
    pub footer: String,
}

impl Default for FirmProfile {
    fn default() -> Self {
        Self {
            name: "Vinco Wealth Management".to_string(),
            contact_phone: "0203 950 3751".to_string(),
            footer: "Vinco Wealth Management Ltd is authorised and regulated by the Financial \
                     Conduct Authority. FCA Register Number: 770606."
                .to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    #[serde(default)]
    pub platform: Platform,
    pub database_url: String,
    #[serde(default)]
    pub seed_demo_data: bool,
    /// Root for generated letters. Empty means the user's documents directory.
    #[serde(default)]
    pub documents_dir: String,
    pub letters_folder: String,
    #[serde(default)]
    pub fonts: FontConfig,
    #[serde(default)]
    pub firm: FirmProfile,
}

impl ServerConfig {
    /// Resolves the directory the letters folder lives in.
    pub fn documents_root(&self) -> PathBuf {
        if !self.documents_dir.trim().is_empty() {
            return PathBuf::from(self.documents_dir.trim());
        }
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Loads `config/default.yaml`, the optional `config/<APP_ENV>.yaml`
/// profile (`local` when unset) and `APP_*` environment overrides.
pub fn load_server_config() -> Result<ServerConfig, ConfigError> {
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(documents_dir: &str) -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".to_string(),
            port: 8080,
            platform: Platform::Desktop,
            database_url: ":memory:".to_string(),
            seed_demo_data: false,
            documents_dir: documents_dir.to_string(),
            letters_folder: "Suitability".to_string(),
            fonts: FontConfig::default(),
            firm: FirmProfile::default(),
        }
    }

    #[test]
    fn explicit_documents_dir_wins() {
        assert_eq!(
            config(" /tmp/letters ").documents_root(),
            PathBuf::from("/tmp/letters")
        );
    }

    #[test]
    fn platform_deserializes_lowercase() {
        let platform: Platform = serde_json::from_str("\"web\"").unwrap();
        assert_eq!(platform, Platform::Web);
    }
}
