//! CLI interface using clap.
//!
//! Provides command-line arguments and subcommands for the tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::{ExportKind, OutputFormat};
use crate::domain::Escaping;

/// rxp-leads - Collect community contacts and messages, export them as VCF/CSV.
#[derive(Parser, Debug)]
#[command(name = "rxp-leads")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging (use multiple times for more verbosity).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Data directory (overrides the config file).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file path (defaults to <data dir>/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a community contact (name is tagged, phone reduced to digits).
    AddContact {
        /// Full name.
        #[arg(short, long)]
        name: String,

        /// Phone number, any formatting.
        #[arg(short, long)]
        phone: String,
    },

    /// Record a contact-form message.
    AddMessage {
        /// Sender name.
        #[arg(short, long)]
        name: String,

        /// Sender email.
        #[arg(short, long)]
        email: String,

        /// Sender phone (optional).
        #[arg(short, long)]
        phone: Option<String>,

        /// Subject: support, inscription, partenariat, suggestion, autre, or free text.
        #[arg(short, long)]
        subject: String,

        /// Message text.
        #[arg(short, long)]
        body: String,
    },

    /// List stored contacts or messages.
    List {
        /// What to list: contacts or messages.
        kind: ExportKind,

        /// Output format: table or json.
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Export contacts as VCF or messages as CSV, to a file or stdout.
    Export {
        /// What to export: contacts or messages.
        kind: ExportKind,

        /// Output file path (stdout if not specified).
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Value escaping: legacy or standard (defaults to the config file).
        #[arg(long)]
        escaping: Option<Escaping>,
    },

    /// Export both collections into a directory using the configured file names.
    ExportAll {
        /// Output directory for exported files.
        #[arg(short, long, default_value = "exports")]
        dir: PathBuf,

        /// Value escaping: legacy or standard (defaults to the config file).
        #[arg(long)]
        escaping: Option<Escaping>,
    },

    /// Import JSON arrays dumped from the site's browser storage.
    Import {
        /// JSON file with the `contacts` array.
        #[arg(long)]
        contacts: Option<PathBuf>,

        /// JSON file with the `messages` array.
        #[arg(long)]
        messages: Option<PathBuf>,
    },

    /// Show record totals.
    Stats,

    /// Show the fixed message subjects.
    Subjects,

    /// Show data, database and config paths being used.
    Paths,

    /// Write the default config file if it does not exist.
    InitConfig,
}
