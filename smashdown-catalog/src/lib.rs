//! Song catalog data model, JSON persistence, and selection policies.
//!
//! This crate owns the `Site → Game → Song` aggregate and everything needed to
//! look entities up, pick which ones to visit next, and persist the whole
//! document back to disk. It knows nothing about HTTP; callers feed it plain
//! ids and counts.

pub mod error;
pub mod select;
pub mod stats;
pub mod store;
pub mod types;

pub use error::{CatalogError, SongLookup};
pub use select::{Visited, compare_staleness};
pub use stats::CatalogStats;
pub use store::Catalog;
pub use types::*;
