//! Forms Engine CLI
//!
//! Inspect and exercise form field collections from the command line.
//!
//! # Usage
//!
//! ```bash
//! formctl check -f form.json
//! formctl deps -f form.yaml --format json
//! formctl cycles -f form.json
//! formctl validate -f form.json --values submission.json
//! formctl new email --order 2 --format yaml
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "formctl")]
#[command(author = "OpenSASE")]
#[command(version)]
#[command(about = "Form field engine command line interface", long_about = None)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, short, env = "FORMCTL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check field configuration and rule definitions
    Check {
        /// Field collection (JSON or YAML)
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Print the conditional dependency map
    Deps {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Report dependency cycles
    Cycles {
        #[arg(short, long)]
        file: PathBuf,
        /// Only report cycles reachable from this field
        #[arg(long)]
        field: Option<String>,
    },
    /// Validate a submission against a field collection
    Validate {
        #[arg(short, long)]
        file: PathBuf,
        /// Submitted values keyed by field id (JSON or YAML)
        #[arg(long)]
        values: PathBuf,
    },
    /// Create a field with type defaults
    New {
        /// Field type, e.g. `email` or `multiple-choice`
        kind: String,
        #[arg(long, default_value_t = 0)]
        order: usize,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = config::load(cli.config.as_deref()).and_then(|engine| match cli.command {
        Commands::Check { file } => commands::check::handle(&file, &engine, cli.format),
        Commands::Deps { file } => commands::deps::handle(&file, cli.format),
        Commands::Cycles { file, field } => {
            commands::cycles::handle(&file, field.as_deref(), cli.format)
        }
        Commands::Validate { file, values } => {
            commands::validate::handle(&file, &values, &engine, cli.format)
        }
        Commands::New { kind, order } => commands::new::handle(&kind, order, &engine, cli.format),
    });

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}
