//! Remove an experiment from the catalog.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use abkit_catalog::Catalog;
use abkit_core::ExperimentId;

/// Remove arguments.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Experiment identifier
    pub id: i64,
}

/// Run the remove command.
pub fn run(root: &Path, args: RemoveArgs) -> Result<()> {
    let mut catalog = Catalog::open(root)?;
    catalog.remove(ExperimentId(args.id))?;

    println!("Removed experiment {}", args.id);
    Ok(())
}
