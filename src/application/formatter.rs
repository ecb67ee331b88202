//! Terminal output for stored records.
//!
//! Supports a table view and JSON for programmatic use.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::domain::{Contact, Message, RecordStats, Subject};

/// Output format for listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Compact table listing.
    #[default]
    Table,
    /// JSON format for programmatic use.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {s}. Use: table, json")),
        }
    }
}

/// Formats a table listing of contacts.
pub fn format_contacts_table(contacts: &[Contact]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Nom", "Téléphone", "Ajouté"]);

    for (i, contact) in contacts.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            contact.name.clone(),
            contact.phone.clone(),
            format_created(contact.created_at),
        ]);
    }

    table.to_string()
}

/// Formats a table listing of messages.
pub fn format_messages_table(messages: &[Message]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Nom", "Email", "Sujet", "Message", "Reçu"]);

    for (i, message) in messages.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            message.name.clone(),
            message.email.clone(),
            message.subject.label().to_string(),
            truncate(&message.body, 40),
            format_created(message.created_at),
        ]);
    }

    table.to_string()
}

/// Formats records as pretty JSON.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_records_json<T: serde::Serialize>(records: &[T]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Formats record totals for display.
pub fn format_stats(stats: &RecordStats) -> String {
    format!(
        "{}\n  Total contacts: {}\n  Total messages: {}",
        "📊 Statistiques".bold(),
        stats.contacts.to_string().cyan(),
        stats.messages.to_string().green(),
    )
}

/// Formats the fixed subject list.
pub fn format_subjects() -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Valeur", "Libellé"]);

    for subject in Subject::FIXED {
        table.add_row(vec![subject.value(), subject.label()]);
    }

    table.to_string()
}

fn format_created(created_at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    created_at.map_or_else(
        || "-".to_string(),
        |dt| dt.format("%Y-%m-%d %H:%M").to_string(),
    )
}

/// Truncates to the first line and at most `max_chars` characters.
fn truncate(s: &str, max_chars: usize) -> String {
    let line = s.lines().next().unwrap_or(s);
    if line.chars().count() <= max_chars {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
