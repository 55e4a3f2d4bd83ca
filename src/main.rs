//! sample-loader CLI - replace a SQLite table with a batch of records

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sample_loader::config::{self, LoaderConfig};
use sample_loader::input::InputFormat;
use sample_loader::ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sample-loader")]
#[command(version)]
#[command(about = "Load records into a freshly recreated SQLite table")]
#[command(long_about = r#"
Every load drops sample_table1, recreates it and inserts the given records
in a single transaction. A failed load leaves the table empty.

Example usage:
  sample-loader sample
  sample-loader load --input rows.jsonl --database ./rows.db
  sample-loader dump --database ./rows.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the two built-in sample records
    Sample {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },

    /// Load records from a JSON or JSON Lines file
    Load {
        /// Record file (defaults to `input` from the config)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Input format (json, jsonl); guessed from the extension if omitted
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Print the table ordered by pid
    Dump {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        /// Database path to record in the config
        #[arg(short, long)]
        database: Option<String>,

        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(config::default_config_path);
    let settings = config::load_config(Some(config_path.as_path()))?.unwrap_or_default();

    match cli.command {
        Commands::Sample { database } => {
            let database = database.unwrap_or_else(|| settings.database_path());
            commands::run_sample(&database)
        }

        Commands::Load { input, database, format } => {
            let database = database.unwrap_or_else(|| settings.database_path());
            let input = resolve_input(input, &settings)?;
            let format = format.map(|f| f.parse::<InputFormat>()).transpose()?;
            commands::run_load(&database, &input, format)
        }

        Commands::Dump { database, json } => {
            let database = database.unwrap_or_else(|| settings.database_path());
            commands::run_dump(&database, json)
        }

        Commands::Init { database, force } => commands::run_init(&config_path, database, force),
    }
}

fn resolve_input(input: Option<PathBuf>, settings: &LoaderConfig) -> anyhow::Result<PathBuf> {
    match input.or_else(|| settings.input.as_ref().map(PathBuf::from)) {
        Some(path) => Ok(path),
        None => {
            ui::warn("no input file given and none configured");
            anyhow::bail!("missing --input")
        }
    }
}
