//! hourboard - Hour-package consumption ledger

mod cli;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cli::CliError;
use hourboard_core::models::{CompanyId, MonthYear};
use hourboard_core::{
    alert_level, get_quota, DatasetLoader, HourboardConfig, InMemoryStore, Ledger, OutputFormat,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "hourboard",
    version,
    about = "Hour-package consumption ledger",
    long_about = "Reconciles contracted support hours against project consumption.\n\
                  \n\
                  Reads companies, quotas and projects from a JSON or TOML dataset and\n\
                  reports contracted / consumed / remaining hours, carry-over between\n\
                  months and the project that pushed a package over its limit.\n\
                  \n\
                  Examples:\n\
                    hourboard --data portfolio.json figure acme          # All-time figure\n\
                    hourboard --data portfolio.json figure acme --month 2 --year 2025\n\
                    hourboard --data portfolio.json attribute acme       # Overage walk\n\
                    hourboard --data portfolio.json rollup acme globex   # Portfolio totals\n\
                    hourboard --data portfolio.json valid acme 2025-04   # Contract window\n\
                    hourboard --data portfolio.json statement acme --through 2025-06\n\
                  \n\
                  Environment Variables:\n\
                    HOURBOARD_DATA     # Dataset file\n\
                    HOURBOARD_CONFIG   # Config file (<config_dir>/hourboard/config.toml)\n\
                    HOURBOARD_NO_COLOR # Disable ANSI colors (log-friendly)\n\
                    RUST_LOG           # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    mode: Mode,

    /// Dataset file (.json or .toml)
    #[arg(long, env = "HOURBOARD_DATA")]
    data: PathBuf,

    /// Config file
    #[arg(long, env = "HOURBOARD_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON (overrides the configured format)
    #[arg(long, global = true)]
    json: bool,

    /// Disable ANSI colors (log-friendly)
    #[arg(long, global = true, env = "HOURBOARD_NO_COLOR")]
    no_color: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Optional month selector shared by the figure commands
#[derive(clap::Args, Clone, Copy)]
struct PeriodArgs {
    /// Month (1-12), requires --year
    #[arg(long)]
    month: Option<u32>,
    /// Year, requires --month
    #[arg(long)]
    year: Option<u32>,
}

#[derive(Subcommand)]
enum Mode {
    /// Contracted / consumed / remaining hours for one company
    Figure {
        company: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Walk consuming projects in order and flag the one that crossed the limit
    Attribute {
        company: String,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Totals across several companies (no carry-over)
    Rollup {
        #[arg(required = true)]
        companies: Vec<String>,
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Whether a company's contract applies to a month
    Valid {
        company: String,
        /// Month as YYYY-MM
        month: MonthYear,
    },
    /// Month-by-month balances from contract start
    Statement {
        company: String,
        /// Last month to include, as YYYY-MM
        #[arg(long)]
        through: MonthYear,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = HourboardConfig::load(cli.config.as_deref());
    let json = cli.json || config.output.format == OutputFormat::Json;
    let no_color = cli.no_color;

    let store = load_store(&cli.data)?;
    let ledger = Ledger::new(&store);

    let output = match cli.mode {
        Mode::Figure { company, period } => {
            run_figure(&ledger, &config, company, period, json, no_color)?
        }
        Mode::Attribute { company, period } => {
            run_attribute(&ledger, company, period, json, no_color)?
        }
        Mode::Rollup { companies, period } => {
            run_rollup(&ledger, companies, period, json, no_color)?
        }
        Mode::Valid { company, month } => run_valid(&store, company, month, json)?,
        Mode::Statement { company, through } => {
            run_statement(&ledger, company, through, json, no_color)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Log to stderr, `RUST_LOG` wins over `-v`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_store(path: &Path) -> Result<InMemoryStore> {
    DatasetLoader::load_file(path)
        .map_err(CliError::from)
        .with_context(|| format!("Failed to load dataset {}", path.display()))
}

fn run_figure(
    ledger: &Ledger<&InMemoryStore>,
    config: &HourboardConfig,
    company: String,
    period: PeriodArgs,
    json: bool,
    no_color: bool,
) -> Result<String, CliError> {
    let company = CompanyId::from(company);
    let figure = ledger.compute_figure(&company, period.month, period.year)?;
    let level = alert_level(&figure, &config.alerts);
    let label = cli::period_label(period.month, period.year);

    Ok(cli::format_figure(&company, &label, &figure, level, json, no_color))
}

fn run_attribute(
    ledger: &Ledger<&InMemoryStore>,
    company: String,
    period: PeriodArgs,
    json: bool,
    no_color: bool,
) -> Result<String, CliError> {
    let company = CompanyId::from(company);
    let details = ledger.attribute(&company, period.month, period.year)?;

    Ok(cli::format_excess(&details, json, no_color))
}

fn run_rollup(
    ledger: &Ledger<&InMemoryStore>,
    companies: Vec<String>,
    period: PeriodArgs,
    json: bool,
    no_color: bool,
) -> Result<String, CliError> {
    let ids: Vec<CompanyId> = companies.into_iter().map(CompanyId::from).collect();
    let aggregate = ledger.rollup(&ids, period.month, period.year)?;
    let label = cli::period_label(period.month, period.year);

    Ok(cli::format_rollup(&label, &aggregate, json, no_color))
}

fn run_valid(
    store: &InMemoryStore,
    company: String,
    month: MonthYear,
    json: bool,
) -> Result<String, CliError> {
    let company = CompanyId::from(company);
    let quota = get_quota(store, &company)?;
    let valid = Ledger::<&InMemoryStore>::is_valid(&quota, month);

    Ok(cli::format_validity(&quota, month, valid, json))
}

fn run_statement(
    ledger: &Ledger<&InMemoryStore>,
    company: String,
    through: MonthYear,
    json: bool,
    no_color: bool,
) -> Result<String, CliError> {
    let company = CompanyId::from(company);
    let rows = ledger.statement(&company, through)?;

    Ok(cli::format_statement(&company, &rows, json, no_color))
}
