//! Redress Control - CLI for the grievance redressal system.
//!
//! Presentation collaborator: collects submissions, invokes the decision
//! pipeline, and renders the resulting records.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "redressctl")]
#[command(about = "Grievance redressal system - complaint analysis and routing", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the category classifier from a labeled CSV
    Train {
        /// CSV file with complaint_text,category rows
        #[arg(long)]
        data: PathBuf,

        /// Artifact output path (defaults to the configured model path)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Submit a complaint through the decision pipeline
    Submit {
        /// Citizen name
        #[arg(long)]
        name: String,

        /// Citizen email
        #[arg(long)]
        email: String,

        /// Complaint text
        #[arg(long)]
        text: String,
    },

    /// Show a stored complaint by ticket id
    Show {
        ticket_id: String,

        /// Emit the record as JSON instead of the summary view
        #[arg(long)]
        json: bool,
    },

    /// List stored complaints, most urgent first
    List {
        /// Only show one priority level (critical, high, medium, low)
        #[arg(long)]
        priority: Option<String>,
    },

    /// Regenerate the report document for a ticket
    Report {
        ticket_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Train { data, out } => commands::train(&data, out),
        Commands::Submit { name, email, text } => commands::submit(name, email, text),
        Commands::Show { ticket_id, json } => commands::show(&ticket_id, json),
        Commands::List { priority } => commands::list(priority),
        Commands::Report { ticket_id } => commands::report(&ticket_id),
    }
}
