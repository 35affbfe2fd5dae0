//! Core domain for abkit.
//!
//! This crate holds the in-memory model of an A/B test experiment and the
//! routines that operate on it:
//!
//! - **Builder** ([`build_lists`]) merges ranked candidate source lists
//!   into a deduplicated client universe and splits it into two disjoint
//!   assignment lists.
//! - **Evaluator** ([`evaluate`]) computes contract-conversion percentages
//!   per assignment list, overall or per acquisition source.
//! - **Experiment** ([`Experiment`]) owns the assignment lists and gates
//!   construction behind a created flag.
//!
//! Everything here is pure and synchronous. Reading and writing tables on
//! disk is the catalog's job; the core only sees already-parsed data.

mod builder;
mod error;
mod evaluate;
mod experiment;
mod types;

pub use builder::{BuiltLists, build_lists};
pub use error::{Error, Result};
pub use evaluate::evaluate;
pub use experiment::{AssignmentLists, Experiment};
pub use types::{ClientRecord, Contract, Evaluation, ExperimentId, Group, SourceList, Strategy};
