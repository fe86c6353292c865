use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use interest_tracker_rs::api::{self, AppState};
use interest_tracker_rs::export::format_months;
use interest_tracker_rs::validation::{parse_calendar_date, validate_principal, validate_rate};
use interest_tracker_rs::{
    Calculation, FileStore, InvestmentRecord, InvestmentStore, InvestmentTracker, StorageConfig, TrackerConfig,
    ValidationField,
};

/// Investment interest tracker: simple and compound interest over a date range
#[derive(Parser)]
#[command(name = "interest-tracker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON HTTP API
    Serve {
        /// Address to listen on (overrides INTEREST_TRACKER_ADDR / PORT)
        #[arg(long)]
        addr: Option<String>,

        /// JSON history file; in-memory history when omitted
        #[arg(long)]
        data: Option<PathBuf>,

        /// Number of records kept, newest first
        #[arg(long)]
        history_limit: Option<usize>,
    },

    /// Compute interest once without storing anything
    Calc {
        #[arg(long)]
        principal: Decimal,

        /// Monthly rate in percent, e.g. 5 for 5% per month
        #[arg(long)]
        rate: Decimal,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the stored history, newest first
    List {
        #[arg(long)]
        data: PathBuf,
    },

    /// Export the stored history as CSV
    Export {
        #[arg(long)]
        data: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "interest_tracker_rs=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let mut config = TrackerConfig::from_env().context("loading configuration")?;

    match cli.command {
        Commands::Serve {
            addr,
            data,
            history_limit,
        } => {
            if let Some(addr) = addr {
                config.listen_addr = addr;
            }
            if let Some(path) = data {
                config.storage = StorageConfig::File { path };
            }
            if let Some(limit) = history_limit {
                config.history_limit = limit;
            }
            serve(config).await
        }
        Commands::Calc {
            principal,
            rate,
            start,
            end,
            format,
        } => {
            println!("{}", calc(&config, principal, rate, &start, &end, format)?);
            Ok(())
        }
        Commands::List { data } => {
            let store = FileStore::open(&data, config.history_limit)?;
            println!("{}", render_history(&store.list()?));
            Ok(())
        }
        Commands::Export { data, output } => {
            let store = FileStore::open(&data, config.history_limit)?;
            let tracker = InvestmentTracker::new(Box::new(store), config.limits);
            let csv = tracker.export_csv()?;
            match output {
                Some(path) => {
                    fs::write(&path, csv).with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "history exported");
                }
                None => print!("{}", csv),
            }
            Ok(())
        }
    }
}

async fn serve(config: TrackerConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("invalid listen address {}", config.listen_addr))?;

    let store = config.open_store()?;
    let tracker = InvestmentTracker::new(store, config.limits);
    let app = api::router(AppState::new(tracker));

    info!(%addr, storage = ?config.storage, history_limit = config.history_limit, "starting interest tracker");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn calc(
    config: &TrackerConfig,
    principal: Decimal,
    rate: Decimal,
    start: &str,
    end: &str,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let principal = validate_principal(principal, &config.limits)?;
    let rate = validate_rate(rate, &config.limits)?;
    let start = parse_calendar_date(start, ValidationField::StartDate)?;
    let end = parse_calendar_date(end, ValidationField::EndDate)?;

    let calc = Calculation::compute(principal, rate, start, end)?;
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&calc)?,
        OutputFormat::Text => [
            format!("Principal:          {}", principal),
            format!("Rate:               {}", rate),
            format!(
                "Period:             {} to {} ({} months)",
                start,
                calc.end_date,
                format_months(calc.month_count)
            ),
            format!("Simple interest:    {}", calc.interest.simple_interest),
            format!("Total (simple):     {}", calc.interest.total_simple),
            format!("Compound interest:  {}", calc.interest.compound_interest),
            format!("Total (compound):   {}", calc.interest.total_compound),
        ]
        .join("\n"),
    };
    Ok(out)
}

fn render_history(records: &[InvestmentRecord]) -> String {
    if records.is_empty() {
        return "no investments recorded".to_string();
    }
    records
        .iter()
        .map(|record| match &record.calculation {
            Some(calc) => format!(
                "{}  {:<24} {:>12} {:>12}  {} to {}  simple {}  compound {}",
                record.id,
                record.name,
                record.principal.to_string(),
                record.monthly_rate.to_string(),
                record.start_date,
                calc.end_date,
                calc.interest.total_simple,
                calc.interest.total_compound,
            ),
            None => format!(
                "{}  {:<24} {:>12} {:>12}  from {}  (not calculated)",
                record.id,
                record.name,
                record.principal.to_string(),
                record.monthly_rate.to_string(),
                record.start_date,
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
