// src/lib.rs

//! unisite: content client for a multilingual university site.
//!
//! Records come from the site's REST endpoints (or local fixtures), localized
//! fields are resolved through one fallback chain, and listings are filtered
//! and paginated on the client side.

pub mod error;
pub mod locale;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod sources;
pub mod storage;
pub mod utils;
