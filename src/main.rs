use cashii::args::{Args, Command};
use cashii::{commands, Config, Result};
use chrono::Local;
use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    if args.common().no_color() {
        colored::control::set_override(false);
    }

    let config = Config::new(args.common().ledger().path());
    debug!("Using ledger {}", config.ledger_path().display());
    let storage = config.storage();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Get(transfer_args) => commands::get(&storage, transfer_args.clone())
            .await?
            .print(),

        Command::Send(transfer_args) => commands::send(&storage, transfer_args.clone())
            .await?
            .print(),

        Command::Remove(remove_args) => commands::remove(&storage, remove_args.clone())
            .await?
            .print(),

        Command::List => commands::list(&storage).await?.print(),

        Command::View(view_args) => {
            let today = Local::now().date_naive();
            commands::view(&storage, view_args.clone(), today)
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
