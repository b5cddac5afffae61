//! Service layer for the content client.
//!
//! This module contains the logic for:
//! - Localized field resolution (`LocalizedFieldResolver`)
//! - Category filtering and pinned splitting
//! - Client-side pagination
//! - Display text helpers (dates, excerpts, HTML bodies)

pub mod filter;
pub mod paging;
mod resolver;
pub mod text;

pub use filter::{CategoryFilter, filter_records, split_pinned};
pub use paging::{Page, page, paginate};
pub use resolver::{LocalizedFieldResolver, field_families};
