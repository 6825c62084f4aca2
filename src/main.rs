mod config;
mod db;
mod error;
mod fmt;
mod models;
mod operations;
mod session;
mod tui;

use clap::{Parser, Subcommand};
use config::Config;
use db::store::SqliteExpenseStore;
use env_logger::Env;
use error::AppError;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "expense-tracker", version, about = "Track personal expenses in the terminal")]
struct Cli {
    /// Path to the SQLite database (overrides EXPENSE_DB_PATH, DB_DIR and DB_NAME)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import expenses from a CSV file (date,amount,category[,description])
    Import {
        /// CSV file to import
        file: PathBuf,
    },
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::from_env(cli.db);
    let store = SqliteExpenseStore::new(config);
    store.initialize()?;

    match cli.command {
        None => tui::run(store),
        Some(Commands::Import { file }) => {
            let mut store = store;
            let count = operations::import::import_csv(&mut store, &file)?;
            println!("Imported {} expenses.", count);
            Ok(())
        }
    }
}

fn main() {
    // Quiet by default so log lines do not land on top of the TUI.
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
