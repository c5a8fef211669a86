use crate::infra::parse_date;
use crate::render::run_report;
use crate::server;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rewards::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Rewards Dashboard",
    about = "Serve and inspect the customer rewards dashboard from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the reward tables for a transaction snapshot and print them
    Report(ReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Transaction snapshot to load at startup (JSON array or CSV export)
    #[arg(long)]
    pub(crate) transactions: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Transaction snapshot to report over (JSON array or CSV export)
    #[arg(long)]
    pub(crate) transactions: PathBuf,
    /// Only list transactions purchased on or after this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Only list transactions purchased on or before this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) to: Option<NaiveDate>,
    /// Include the full newest-first transaction listing in the output
    #[arg(long)]
    pub(crate) list_transactions: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
    }
}
