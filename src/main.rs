//! rxp-leads - Collect community contacts and messages, export them as VCF/CSV.
//!
//! Records are kept in a local `SQLite` database. Contacts are normalized on
//! the way in (name tagged with " (RXP)", phone reduced to digits) and
//! exported as vCard 3.0; messages are exported as CSV.
//!
//! QUICK START:
//!   rxp-leads add-contact -n "Jean" -p "+225 07-12-34"
//!   rxp-leads add-message -n Awa -e awa@example.com -s support -b "Bonjour"
//!   rxp-leads list contacts
//!   rxp-leads export contacts -o contacts.vcf
//!   rxp-leads export messages --escaping standard > messages.csv
//!   rxp-leads import --contacts contacts.json --messages messages.json

mod application;
mod cli;
mod domain;
mod infrastructure;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use application::{
    export_contacts_vcf, export_messages_csv, format_contacts_table, format_messages_table,
    format_records_json, format_stats, format_subjects, import_contacts, import_messages,
    submit_contact, submit_message, ExportKind, ImportReport, OutputFormat, SubmitOutcome,
};
use cli::{Cli, Commands};
use domain::{AppConfig, ContactDraft, Escaping, MessageDraft, RecordStore};
use infrastructure::{ensure_config_exists, load_config, SqliteStore};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

/// Resolved runtime context: configuration plus where it came from.
struct RunContext {
    config: AppConfig,
    config_path: PathBuf,
}

impl RunContext {
    fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.config.database_path();
        SqliteStore::open(&path)
            .with_context(|| format!("Failed to open record store at {}", path.display()))
    }

    fn escaping(&self, flag: Option<Escaping>) -> Escaping {
        flag.unwrap_or(self.config.export.escaping)
    }
}

/// Loads the config file and applies CLI overrides.
fn resolve_context(cli: &Cli) -> anyhow::Result<RunContext> {
    let base_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(AppConfig::default_data_dir);
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| base_dir.join("config.toml"));

    let mut config = load_config(&config_path)?;
    if let Some(dir) = &cli.data_dir {
        config.paths.data_dir = Some(dir.clone());
    }

    Ok(RunContext {
        config,
        config_path,
    })
}

/// Main application logic.
fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = resolve_context(&cli)?;

    match cli.command {
        Commands::AddContact { name, phone } => {
            cmd_add_contact(&ctx, ContactDraft { name, phone })?;
        }
        Commands::AddMessage {
            name,
            email,
            phone,
            subject,
            body,
        } => {
            cmd_add_message(
                &ctx,
                MessageDraft {
                    name,
                    email,
                    phone,
                    subject,
                    body,
                },
            )?;
        }
        Commands::List { kind, format } => {
            cmd_list(&ctx, kind, format)?;
        }
        Commands::Export {
            kind,
            output,
            escaping,
        } => {
            cmd_export(&ctx, kind, output.as_deref(), ctx.escaping(escaping))?;
        }
        Commands::ExportAll { dir, escaping } => {
            cmd_export_all(&ctx, &dir, ctx.escaping(escaping))?;
        }
        Commands::Import { contacts, messages } => {
            cmd_import(&ctx, contacts.as_deref(), messages.as_deref())?;
        }
        Commands::Stats => {
            cmd_stats(&ctx)?;
        }
        Commands::Subjects => {
            println!("{}", format_subjects());
        }
        Commands::Paths => {
            cmd_paths(&ctx);
        }
        Commands::InitConfig => {
            cmd_init_config(&ctx)?;
        }
    }

    Ok(())
}

/// Add contact command.
fn cmd_add_contact(ctx: &RunContext, draft: ContactDraft) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    match submit_contact(&store, &draft)? {
        SubmitOutcome::Created(contact) => {
            println!(
                "{} Contact enregistré : {} ({})",
                "✓".green().bold(),
                contact.name.cyan(),
                contact.phone
            );
        }
        SubmitOutcome::AlreadyExists(existing) => {
            println!(
                "{} Ce contact existe déjà : {}",
                "ℹ".yellow().bold(),
                existing.name.cyan()
            );
        }
    }

    Ok(())
}

/// Add message command.
fn cmd_add_message(ctx: &RunContext, draft: MessageDraft) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let message = submit_message(&store, &draft)?;

    println!(
        "{} Message de {} enregistré ({})",
        "✓".green().bold(),
        message.name.cyan(),
        message.subject.label()
    );

    Ok(())
}

/// List records command.
fn cmd_list(ctx: &RunContext, kind: ExportKind, format: OutputFormat) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    let output = match (kind, format) {
        (ExportKind::Contacts, OutputFormat::Table) => format_contacts_table(&store.list_contacts()?),
        (ExportKind::Contacts, OutputFormat::Json) => {
            format_records_json(&store.list_contacts()?).context("Failed to serialize contacts")?
        }
        (ExportKind::Messages, OutputFormat::Table) => format_messages_table(&store.list_messages()?),
        (ExportKind::Messages, OutputFormat::Json) => {
            format_records_json(&store.list_messages()?).context("Failed to serialize messages")?
        }
    };

    println!("{output}");
    Ok(())
}

/// Renders one export from the current store snapshot.
fn render_export(
    store: &impl RecordStore,
    kind: ExportKind,
    escaping: Escaping,
) -> anyhow::Result<(String, usize)> {
    Ok(match kind {
        ExportKind::Contacts => {
            let contacts = store.list_contacts()?;
            (export_contacts_vcf(&contacts, escaping), contacts.len())
        }
        ExportKind::Messages => {
            let messages = store.list_messages()?;
            (export_messages_csv(&messages, escaping), messages.len())
        }
    })
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Export to file or stdout.
fn cmd_export(
    ctx: &RunContext,
    kind: ExportKind,
    output_path: Option<&Path>,
    escaping: Escaping,
) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let (content, count) = render_export(&store, kind, escaping)?;

    tracing::info!(?kind, ?escaping, count, mime = kind.mime_type(), "Rendered export");

    match output_path {
        Some(path) => {
            write_file(path, &content)?;
            println!(
                "{} Exported {} records to {} ({})",
                "✓".green().bold(),
                count,
                path.display(),
                kind.mime_type()
            );
        }
        None => {
            // Raw bytes: the CSV has no trailing newline and VCF blocks carry their own.
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}

/// Export both collections into a directory.
fn cmd_export_all(ctx: &RunContext, dir: &Path, escaping: Escaping) -> anyhow::Result<()> {
    let store = ctx.open_store()?;

    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory {}", dir.display()))?;

    for kind in [ExportKind::Contacts, ExportKind::Messages] {
        let (content, count) = render_export(&store, kind, escaping)?;
        let path = dir.join(kind.file_name(&ctx.config.export));
        write_file(&path, &content)?;

        println!("{} {} records → {}", "✓".green(), count, path.display());
    }

    println!("\n{} Exported to {}/", "📁".bold(), dir.display());

    Ok(())
}

/// Import browser-storage dumps.
fn cmd_import(
    ctx: &RunContext,
    contacts: Option<&Path>,
    messages: Option<&Path>,
) -> anyhow::Result<()> {
    if contacts.is_none() && messages.is_none() {
        anyhow::bail!("Nothing to import: pass --contacts and/or --messages");
    }

    let store = ctx.open_store()?;

    if let Some(path) = contacts {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = import_contacts(&store, &data)
            .with_context(|| format!("Failed to import contacts from {}", path.display()))?;
        print_import_report("contacts", &report);
    }

    if let Some(path) = messages {
        let data = std::fs::read(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let report = import_messages(&store, &data)
            .with_context(|| format!("Failed to import messages from {}", path.display()))?;
        print_import_report("messages", &report);
    }

    Ok(())
}

fn print_import_report(label: &str, report: &ImportReport) {
    println!(
        "{} {}: {} imported, {} duplicates, {} skipped",
        "✓".green().bold(),
        label,
        report.imported.to_string().cyan(),
        report.duplicates,
        report.skipped.to_string().yellow()
    );
}

/// Show statistics command.
fn cmd_stats(ctx: &RunContext) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    println!("{}", format_stats(&store.stats()?));
    Ok(())
}

/// Show paths command.
fn cmd_paths(ctx: &RunContext) {
    println!("{}", "📂 rxp-leads paths".bold());
    println!();
    println!("  data:     {}", ctx.config.data_dir().display());
    println!("  database: {}", ctx.config.database_path().display());

    let exists = if ctx.config_path.exists() {
        "found".green()
    } else {
        "not found, using defaults".yellow()
    };
    println!("  config:   {} [{}]", ctx.config_path.display(), exists);
}

/// Write default config command.
fn cmd_init_config(ctx: &RunContext) -> anyhow::Result<()> {
    if ensure_config_exists(&ctx.config_path)? {
        println!(
            "{} Created {}",
            "✓".green().bold(),
            ctx.config_path.display()
        );
    } else {
        println!("Config already exists: {}", ctx.config_path.display());
    }
    Ok(())
}

/// Setup tracing/logging based on verbosity level.
fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
