//! modplan: inspect and query a degree plan dataset
//!
//! ```text
//! modplan --data plan.json check
//! modplan --data plan.json query "name:Data AND (code:CS1231 OR code:CS1010)"
//! modplan --data plan.json query --slots "credits:4"
//! modplan --data plan.json plan
//! modplan --data plan.json categories
//! ```

mod commands;
mod diagnostics;
mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use modplan_store::{Aggregate, Dataset, StoreConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "modplan", version, about = "Degree planner dataset tool")]
struct Cli {
    /// JSON dataset with modules, degree_plan and requirement_categories
    #[arg(long, global = true, default_value = "modplan.json")]
    data: PathBuf,

    /// Optional JSON store configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report every consistency problem in the dataset
    Check,

    /// Filter modules (or degree plan slots) with a boolean expression
    Query {
        /// e.g. "name:Data AND (code:CS1231 OR code:CS1010)"
        expression: String,

        /// Match degree plan slots instead of modules
        #[arg(long)]
        slots: bool,
    },

    /// Print the degree plan with credits per semester
    Plan,

    /// Print credit progress per requirement category
    Categories,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);
    debug!(?cli, "parsed arguments");

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;
    let dataset = read_dataset(&cli.data)?;

    match &cli.command {
        Command::Check => {
            let violations = commands::check(&dataset, &config)?;
            print!("{}", commands::render_violations(&violations));
            if !violations.is_empty() {
                return Ok(ExitCode::from(1));
            }
        }
        Command::Query { expression, slots } => {
            let aggregate = load_aggregate(&cli.data, dataset)?;
            let predicate = match modplan_query::compile(expression) {
                Ok(predicate) => predicate,
                Err(err) => {
                    eprint!("{}", diagnostics::render_parse_error(expression, &err));
                    return Ok(ExitCode::from(2));
                }
            };
            if *slots {
                print!("{}", commands::query_slots(&aggregate, &predicate));
            } else {
                print!("{}", commands::query_modules(&aggregate, &predicate));
            }
        }
        Command::Plan => print!("{}", commands::plan(&load_aggregate(&cli.data, dataset)?)),
        Command::Categories => {
            print!("{}", commands::categories(&load_aggregate(&cli.data, dataset)?))
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn load_aggregate(path: &Path, dataset: Dataset) -> anyhow::Result<Aggregate> {
    let aggregate = Aggregate::from_dataset(dataset)
        .with_context(|| format!("{} is inconsistent; run `modplan check`", path.display()))?;
    info!(
        modules = aggregate.modules().len(),
        slots = aggregate.slots().len(),
        categories = aggregate.categories().len(),
        "loaded dataset"
    );
    Ok(aggregate)
}

fn load_config(path: Option<&Path>) -> anyhow::Result<StoreConfig> {
    let Some(path) = path else {
        return Ok(StoreConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read_dataset(path: &Path) -> anyhow::Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("malformed dataset {}", path.display()))
}
