//! Register a new experiment in the catalog.

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use abkit_catalog::Catalog;
use abkit_core::{Experiment, ExperimentId};

/// Create arguments.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Integer experiment identifier, unique within the catalog
    pub id: i64,

    /// Free-form description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: NaiveDate,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    pub end: NaiveDate,

    /// Mark the experiment as active
    #[arg(long)]
    pub active: bool,
}

/// Run the create command.
pub fn run(root: &Path, args: CreateArgs) -> Result<()> {
    let mut catalog = Catalog::open(root)?;

    let experiment = Experiment::new(
        ExperimentId(args.id),
        args.description,
        args.start,
        args.end,
        args.active,
    );
    catalog.add(&experiment)?;

    println!("Created experiment {}", experiment.id());
    Ok(())
}
