//! Show one experiment.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use abkit_catalog::Catalog;
use abkit_core::ExperimentId;

/// Show arguments.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Experiment identifier
    pub id: i64,
}

/// Run the show command.
pub fn run(root: &Path, args: ShowArgs) -> Result<()> {
    let catalog = Catalog::open(root)?;
    let experiment = catalog.get(ExperimentId(args.id))?;

    print!("{}", experiment.summary());
    if let Ok(lists) = experiment.lists() {
        println!("List A:\t{} clients", lists.a().len());
        println!("List B:\t{} clients", lists.b().len());
        println!("Provenance:\t{} rows", lists.provenance().len());
    }

    Ok(())
}
