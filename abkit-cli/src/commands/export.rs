//! Export assignment lists and provenance to CSV.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use abkit_catalog::Catalog;
use abkit_core::ExperimentId;

/// Export arguments.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Experiment identifier
    pub id: i64,

    /// Destination directory for a.csv, b.csv, client_sources.csv
    #[arg(long)]
    pub dir: PathBuf,
}

/// Run the export command.
pub fn run(root: &Path, args: ExportArgs) -> Result<()> {
    let catalog = Catalog::open(root)?;
    catalog.export_lists(ExperimentId(args.id), &args.dir)?;

    println!(
        "Exported lists for experiment {} to {}",
        args.id,
        args.dir.display()
    );
    Ok(())
}
