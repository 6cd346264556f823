//! examkit CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "examkit", version, about = "Author, take, and grade exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Author an exam interactively, then optionally take it
    Author {
        /// Save the authored exam definition to this .toml file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Save the grade report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Save the grade report as HTML
        #[arg(long)]
        html: Option<PathBuf>,

        /// Save JSON and HTML reports into the configured output directory
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take an exam from a definition file and grade it
    Take {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,

        /// Override the exam variant: final, practical
        #[arg(long)]
        kind: Option<String>,

        /// Save the grade report as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Save the grade report as HTML
        #[arg(long)]
        html: Option<PathBuf>,

        /// Save JSON and HTML reports into the configured output directory
        #[arg(long)]
        save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print an exam definition as it will be presented
    Show {
        /// Path to the .toml exam definition
        #[arg(long)]
        exam: PathBuf,
    },

    /// Validate exam definition files
    Validate {
        /// Path to an exam definition file or directory
        #[arg(long)]
        exam: PathBuf,
    },

    /// Create starter config and a sample exam
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("examkit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Author {
            output,
            json,
            html,
            save,
            config,
        } => commands::author::execute(output, json, html, save, config),
        Commands::Take {
            exam,
            kind,
            json,
            html,
            save,
            config,
        } => commands::take::execute(exam, kind, json, html, save, config),
        Commands::Show { exam } => commands::show::execute(exam),
        Commands::Validate { exam } => commands::validate::execute(exam),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
