// src/models/mod.rs

//! Domain models for the content client.

mod config;
mod endpoint;
mod listing;
mod record;

// Re-export all public types
pub use config::{ApiConfig, Config, ListingConfig, LocaleConfig, LocaleTransport, LoggingConfig};
pub use endpoint::Endpoint;
pub use listing::{FetchOutcome, decode_detail, decode_listing};
pub use record::Record;
