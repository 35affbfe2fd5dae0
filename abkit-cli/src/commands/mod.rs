//! CLI subcommands.

pub mod build;
pub mod create;
pub mod evaluate;
pub mod export;
pub mod list;
pub mod remove;
pub mod set;
pub mod show;
