use chrono::Local;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use railfare::application::office::TicketOffice;
use railfare::config::MachineConfig;
use railfare::domain::offer::parse_date;
use railfare::domain::ports::SalesLedgerBox;
use railfare::infrastructure::in_memory::InMemorySalesLedger;
use railfare::interfaces::csv::command_reader::CommandReader;
use railfare::interfaces::csv::report_writer::{DestinationWriter, SaleWriter};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Command script CSV file
    script: PathBuf,

    /// JSON file with users, destinations and offers to start from.
    /// Uses the built-in seed data when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Date used for offer lookup (YYYY-MM-DD). Defaults to the local date.
    #[arg(long)]
    today: Option<String>,

    /// Write the sales ledger as CSV to this path.
    #[arg(long)]
    sales: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => MachineConfig::from_path(path).into_diagnostic()?,
        None => MachineConfig::default(),
    };
    let today = match cli.today {
        Some(date) => parse_date(&date).into_diagnostic()?,
        None => Local::now().date_naive(),
    };

    let ledger: SalesLedgerBox = Box::new(InMemorySalesLedger::new());
    let office = TicketOffice::bootstrap(&config, ledger).into_diagnostic()?;

    // Replay the script; a failing command is reported and skipped
    let file = File::open(cli.script).into_diagnostic()?;
    let reader = CommandReader::new(file);
    for command in reader.commands() {
        match command {
            Ok(command) => match office.process(command, today).await {
                Ok(outcome) => info!("{outcome}"),
                Err(e) => warn!("Error processing command: {e}"),
            },
            Err(e) => warn!("Error reading command: {e}"),
        }
    }

    let report = office.into_report().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = DestinationWriter::new(stdout.lock());
    writer
        .write_destinations(&report.destinations)
        .into_diagnostic()?;

    if let Some(path) = cli.sales {
        let file = File::create(path).into_diagnostic()?;
        SaleWriter::new(file)
            .write_sales(&report.sales)
            .into_diagnostic()?;
    }

    Ok(())
}
