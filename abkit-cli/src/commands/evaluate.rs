//! Evaluate conversion rates for an assignment list.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use abkit_catalog::{Catalog, tables};
use abkit_core::{Evaluation, ExperimentId, Group, Strategy};

/// Evaluate arguments.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Experiment identifier
    pub id: i64,

    /// Assignment list to evaluate: A or B
    #[arg(long)]
    pub group: String,

    /// Contracts table CSV (CLIENT_ID, DATE_BEG)
    #[arg(long)]
    pub contracts: PathBuf,

    /// Aggregation strategy: general or by_source
    #[arg(long, default_value = "general")]
    pub strategy: String,
}

/// Run the evaluate command.
pub fn run(root: &Path, args: EvaluateArgs) -> Result<()> {
    let group: Group = args.group.parse()?;
    let strategy: Strategy = args.strategy.parse()?;

    let catalog = Catalog::open(root)?;
    let experiment = catalog.get(ExperimentId(args.id))?;
    let contracts = tables::read_contracts(&args.contracts)?;
    tracing::debug!(
        id = args.id,
        group = %group,
        strategy = %strategy,
        contracts = contracts.len(),
        "evaluating assignment list"
    );

    let result = experiment.evaluate(group, &contracts, strategy)?;
    match result {
        Evaluation::General(rate) => {
            println!("Conversion rate for list {group}: {rate:.2}%");
        }
        Evaluation::BySource(rates) => {
            println!("Conversion rates for list {group} by source:");
            for (source, rate) in rates {
                println!("  {source}: {rate:.2}%");
            }
        }
    }

    Ok(())
}
