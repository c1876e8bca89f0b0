use std::path::PathBuf;

use aion_tools::aion::tools::autofill;
use aion_tools::aion::tools::listing::ListingStrategy;
use aion_tools::aion::tools::project::{FRAMEWORK_SPEC_DIR, WORKBOOK_PATH};
use aion_tools::aion::tools::trees::{self, TreeSyncConfig};
use aion_tools::{Result, ToolError};
use clap::{Parser, Subcommand};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_tracing()?;
    match cli.command {
        Command::Autofill(args) => execute_autofill(args),
        Command::SpecTrees(args) => execute_spec_trees(args),
    }
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| ToolError::Logging(error.to_string()))
}

fn execute_autofill(args: AutofillArgs) -> Result<()> {
    let report = autofill::apply_autofill(&args.workbook, &args.spec_dir)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Applied autofill formulas for Framework_Path + Roadmap_Milestone (blank cells only): \
             {} path cells and {} milestone cells below header row {}.",
            report.path_cells_filled, report.milestone_cells_filled, report.header_row
        );
    }
    Ok(())
}

fn execute_spec_trees(args: SpecTreesArgs) -> Result<()> {
    let config = TreeSyncConfig {
        spec_dir: args.spec_dir,
        ..TreeSyncConfig::default()
    };
    let report = trees::sync_spec_trees(&config, ListingStrategy::detect())?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for document in &report.changed_documents {
            println!("Updated: {document}");
        }
        println!("Done. Files updated: {}", report.changed);
    }
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Maintenance tools for the Project Aion workspace."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fill blank derived ticket cells with lookup and quarter-label formulas.
    Autofill(AutofillArgs),
    /// Refresh the directory-tree snapshots inside the specification documents.
    SpecTrees(SpecTreesArgs),
}

#[derive(clap::Args)]
struct AutofillArgs {
    /// Workbook holding the tickets and validation sheets.
    #[arg(long, default_value = WORKBOOK_PATH)]
    workbook: PathBuf,

    /// Directory of realm specification documents.
    #[arg(long, default_value = FRAMEWORK_SPEC_DIR)]
    spec_dir: PathBuf,

    /// Print the run report as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct SpecTreesArgs {
    /// Directory of realm specification documents.
    #[arg(long, default_value = FRAMEWORK_SPEC_DIR)]
    spec_dir: PathBuf,

    /// Print the run report as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}
