//! RecLedger CLI
//!
//! A minimal host for the record service: it opens a store, hands it to the
//! service, and prints the response.
//!
//! # Commands
//!
//! - `init` - Run the service's init hook
//! - `invoke` - Run an operation (`record`, `queryAll`)
//! - `get` - Print the raw value stored under one key
//! - `inspect` - Display store statistics

mod commands;

use clap::{Parser, Subcommand};
use recledger_core::{RecordService, ServiceConfig, DEFAULT_RANGE_END, DEFAULT_RANGE_START};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RecLedger record service host.
#[derive(Parser)]
#[command(name = "recledger")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store log file (in-memory store if omitted)
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Inclusive lower key bound for queryAll
    #[arg(global = true, long, default_value = DEFAULT_RANGE_START)]
    range_start: String,

    /// Exclusive upper key bound for queryAll (empty = unbounded)
    #[arg(global = true, long, default_value = DEFAULT_RANGE_END)]
    range_end: String,

    /// Skip the fsync after every write
    #[arg(global = true, long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the init hook
    Init,

    /// Invoke an operation
    Invoke {
        /// Operation name (record, queryAll)
        function: String,

        /// Positional arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,

        /// Pretty-print JSON payloads (must come before FUNCTION)
        #[arg(long)]
        pretty: bool,
    },

    /// Print the raw value stored under a key
    Get {
        /// The key to look up
        key: String,
    },

    /// Display store statistics
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = RecordService::new(
        ServiceConfig::new().with_range(cli.range_start.as_str(), cli.range_end.as_str()),
    );
    let store_options = commands::StoreOptions {
        path: cli.path,
        sync_on_write: !cli.no_sync,
    };

    match cli.command {
        Commands::Init => {
            let mut store = commands::open_store(&store_options)?;
            commands::invoke::init(&service, &mut *store)?;
        }
        Commands::Invoke {
            function,
            args,
            pretty,
        } => {
            let mut store = commands::open_store(&store_options)?;
            commands::invoke::run(&service, &mut *store, function, args, pretty)?;
        }
        Commands::Get { key } => {
            let store = commands::open_store(&store_options)?;
            commands::get::run(&*store, &key)?;
        }
        Commands::Inspect { format } => {
            let store = commands::open_store(&store_options)?;
            commands::inspect::run(&service, &*store, store_options.path.as_deref(), &format)?;
        }
        Commands::Version => {
            println!("RecLedger CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("RecLedger Core v{}", recledger_core::VERSION);
        }
    }

    Ok(())
}
