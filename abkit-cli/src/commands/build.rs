//! Build or rebuild assignment lists for an experiment.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;

use abkit_catalog::{Catalog, tables};
use abkit_core::{ExperimentId, SourceList};

/// Build / rebuild arguments.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Experiment identifier
    pub id: i64,

    /// Size of each assignment list
    #[arg(long)]
    pub size: usize,

    /// Candidate source list CSV, repeatable, in priority order
    #[arg(long = "source", required = true)]
    pub sources: Vec<PathBuf>,

    /// Seed for the A/B split, for reproducible partitions
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run the build (or rebuild) command.
pub fn run(root: &Path, args: BuildArgs, rebuild: bool) -> Result<()> {
    let mut catalog = Catalog::open(root)?;
    let mut experiment = catalog.get(ExperimentId(args.id))?;

    tracing::debug!(
        id = args.id,
        size = args.size,
        sources = args.sources.len(),
        rebuild,
        "loading candidate source lists"
    );
    let sources: Vec<SourceList> = args
        .sources
        .iter()
        .map(|path| tables::read_source_list(path))
        .collect::<abkit_catalog::Result<_>>()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if rebuild {
        experiment.rebuild_lists(&sources, args.size, &mut rng)?;
    } else {
        experiment.create_lists(&sources, args.size, &mut rng)?;
    }
    catalog.update(&experiment)?;

    let lists = experiment.lists()?;
    println!(
        "{} lists for experiment {}",
        if rebuild { "Rebuilt" } else { "Built" },
        experiment.id()
    );
    println!("List A:\t{} clients", lists.a().len());
    println!("List B:\t{} clients", lists.b().len());
    println!("Provenance:\t{} rows", lists.provenance().len());

    Ok(())
}
