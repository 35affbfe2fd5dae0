use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod paths;

#[derive(Parser)]
#[command(name = "abkit", about = "Manage A/B test experiments and assignment lists")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Catalog root directory (defaults to the abkit data dir)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new experiment
    Create(commands::create::CreateArgs),
    /// List experiments in the catalog
    List(commands::list::ListArgs),
    /// Show one experiment
    Show(commands::show::ShowArgs),
    /// Build assignment lists for an experiment
    Build(commands::build::BuildArgs),
    /// Discard existing assignment lists and build fresh ones
    Rebuild(commands::build::BuildArgs),
    /// Evaluate conversion rates for an assignment list
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Export assignment lists and provenance to CSV
    Export(commands::export::ExportArgs),
    /// Edit experiment metadata
    Set(commands::set::SetArgs),
    /// Remove an experiment from the catalog
    Remove(commands::remove::RemoveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let root = cli.root.unwrap_or_else(paths::data_dir);

    match cli.command {
        Commands::Create(args) => commands::create::run(&root, args),
        Commands::List(args) => commands::list::run(&root, args),
        Commands::Show(args) => commands::show::run(&root, args),
        Commands::Build(args) => commands::build::run(&root, args, false),
        Commands::Rebuild(args) => commands::build::run(&root, args, true),
        Commands::Evaluate(args) => commands::evaluate::run(&root, args),
        Commands::Export(args) => commands::export::run(&root, args),
        Commands::Set(args) => commands::set::run(&root, args),
        Commands::Remove(args) => commands::remove::run(&root, args),
    }
}
