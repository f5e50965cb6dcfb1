//! DTOs that bridge services with the JSON API and the CLI.

pub mod client;
pub mod settings;
pub mod suitability;
