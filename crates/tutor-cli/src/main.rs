//! Tutorpath CLI - Command-line interface for Tutorpath
//!
//! This is the main entry point for users interacting with Tutorpath.
//! It provides commands for importing relation data, resolving learning
//! paths, and serving them over WebSocket.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::PathFormat;

#[derive(Parser)]
#[command(name = "tutor")]
#[command(author = "Tutorpath Contributors")]
#[command(version)]
#[command(about = "Costed, cycle-safe learning paths over a concept wiki", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize Tutorpath in the current directory
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Import relation data from a JSON file
    Import {
        /// JSON file with aliases, teaches, requires and masteries
        file: PathBuf,

        /// Project path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Resolve the learning path for one or more pages
    Path {
        /// Page aliases or ids to learn
        #[arg(required = true)]
        pages: Vec<String>,

        /// Learner whose mastery is taken into account
        #[arg(short, long)]
        user: Option<String>,

        /// Only keep pages the learner explicitly wants
        #[arg(long)]
        only_wanted: bool,

        /// Output as JSON instead of formatted text
        #[arg(long, conflicts_with = "dot")]
        json: bool,

        /// Output the graph as Graphviz DOT
        #[arg(long)]
        dot: bool,

        /// Project path (defaults to current directory)
        #[arg(long, default_value = ".")]
        path: PathBuf,
    },

    /// Show store status and statistics
    Status {
        /// Path to check (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Start the Tutorpath server
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Headless mode: bind to 0.0.0.0 for remote access (WSL/Docker/Server)
        #[arg(long)]
        headless: bool,

        /// Project path (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Import { file, path } => commands::import(&file, &path),
        Commands::Path {
            pages,
            user,
            only_wanted,
            json,
            dot,
            path,
        } => {
            let format = if json {
                PathFormat::Json
            } else if dot {
                PathFormat::Dot
            } else {
                PathFormat::Text
            };
            commands::path(&pages, user.as_deref(), only_wanted, format, &path)
        }
        Commands::Status { path } => commands::status(&path),
        Commands::Serve {
            port,
            headless,
            path,
        } => commands::serve(port, headless, &path).await,
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}
