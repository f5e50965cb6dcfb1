//! Domain records exposed by the CRM service layer.

pub mod client;
pub mod document;
pub mod suitability;
pub mod types;
