//! Pipeline entry points behind the CLI commands.
//!
//! - `build_list`: fetch, filter and paginate one listing
//! - `build_detail`: one record with every localized field resolved
//! - `check_all`: probe endpoints concurrently
//! - `run_snapshot`: save live listings as fixtures

pub mod check;
pub mod list;
pub mod show;
pub mod snapshot;

pub use check::{EndpointCheck, check_all, print_checks};
pub use list::{ListEntry, ListReport, ListRequest, build_list, print_list};
pub use show::{DetailReport, build_detail, print_detail, render_record};
pub use snapshot::{SnapshotStats, run_snapshot};
