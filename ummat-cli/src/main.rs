//! Ummat CLI - Dana Ummat finance report in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, demo, list, logs, summary, transactions};
use ummat_core::{Period, SortField};

/// Ummat - the mosque's public ledger in your terminal
#[derive(Parser)]
#[command(name = "ummat", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show income, expense and balance
    Summary {
        /// Period: week, month, year or all
        #[arg(short, long, default_value = "all")]
        period: Period,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one page of the ledger
    List {
        /// Period: week, month, year or all
        #[arg(short, long, default_value = "all")]
        period: Period,
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: usize,
        /// Rows per page (defaults to app.itemsPerPage)
        #[arg(long)]
        per_page: Option<usize>,
        /// Sort column: date, description, income or expense
        #[arg(short, long, default_value = "date")]
        sort: SortField,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show every Dana Ummat transaction, newest first
    Transactions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch the ledger and report rows that needed a default value
    Check {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{:#}", e);
            if let Some(logger) = commands::get_logger() {
                let _ = logger.log_error("command_failed", &message, Some(&format!("{:?}", e)));
            }
            output::error(&message);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Summary { period, json } => summary::run(period, json),
        Commands::List {
            period,
            page,
            per_page,
            sort,
            asc,
            json,
        } => list::run(list::ListArgs {
            period,
            page,
            per_page,
            sort,
            asc,
            json,
        }),
        Commands::Transactions { json } => transactions::run(json),
        Commands::Check { json } => check::run(json),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
