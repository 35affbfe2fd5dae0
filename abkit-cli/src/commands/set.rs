//! Edit experiment metadata.

use std::path::Path;

use anyhow::{Result, bail};
use chrono::NaiveDate;
use clap::Args;

use abkit_catalog::Catalog;
use abkit_core::ExperimentId;

/// Set arguments.
#[derive(Args, Debug)]
pub struct SetArgs {
    /// Experiment identifier
    pub id: i64,

    /// New description
    #[arg(long)]
    pub description: Option<String>,

    /// New start date (YYYY-MM-DD); requires --end
    #[arg(long, requires = "end")]
    pub start: Option<NaiveDate>,

    /// New end date (YYYY-MM-DD); requires --start
    #[arg(long, requires = "start")]
    pub end: Option<NaiveDate>,

    /// New active flag
    #[arg(long)]
    pub active: Option<bool>,
}

/// Run the set command.
pub fn run(root: &Path, args: SetArgs) -> Result<()> {
    if args.description.is_none() && args.start.is_none() && args.active.is_none() {
        bail!("nothing to set; pass --description, --start/--end, or --active");
    }

    let mut catalog = Catalog::open(root)?;
    let id = ExperimentId(args.id);

    if let Some(description) = &args.description {
        catalog.set_description(id, description)?;
    }
    if let (Some(start), Some(end)) = (args.start, args.end) {
        catalog.set_dates(id, start, end)?;
    }
    if let Some(active) = args.active {
        catalog.set_active(id, active)?;
    }

    println!("Updated experiment {id}");
    Ok(())
}
