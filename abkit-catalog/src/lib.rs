//! Flat-file catalog for abkit experiments.
//!
//! The catalog owns the collection of experiment records and their
//! identifier uniqueness. On disk it keeps:
//!
//! - `experiments.csv` at the root: one metadata row per experiment
//! - `abtest_id_{id}/experiment.json`: the full serialized record
//! - `abtest_id_{id}/{a.csv,b.csv,client_sources.csv}`: assignment lists
//!   and provenance, written once the lists exist
//!
//! The core never touches files; this crate hands it already-parsed
//! tables and persists whatever it produces.

mod catalog;
mod error;
pub mod tables;

pub use catalog::{Catalog, MetadataRow};
pub use error::{Error, Result};
