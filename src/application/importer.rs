//! Import of records dumped from the site's browser storage.
//!
//! The dashboard kept two JSON arrays, `contacts` and `messages`. Contacts go
//! through the same intake as a form submission; messages are validated and
//! kept verbatim. Entries that fail to parse or validate are skipped and
//! counted.

use serde::Deserialize;

use crate::domain::{AppError, ContactDraft, MessageDraft, RecordStore, Result};

use super::intake::{restore_message, submit_contact};

/// Contact entry as stored by the site.
#[derive(Debug, Deserialize)]
struct RawContact {
    #[serde(alias = "nom")]
    name: String,
    #[serde(alias = "telephone")]
    phone: RawText,
}

/// Message entry as stored by the site.
#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(alias = "nom")]
    name: String,
    email: String,
    #[serde(default, alias = "telephone")]
    phone: Option<RawText>,
    #[serde(alias = "sujet")]
    subject: String,
    #[serde(alias = "body")]
    message: String,
}

/// Phone numbers were sometimes saved as JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Number(serde_json::Number),
}

impl RawText {
    /// Text as-is, integers in decimal; `None` for any other number.
    fn into_string(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(n) => n
                .as_u64()
                .map(|v| v.to_string())
                .or_else(|| n.as_i64().map(|v| v.to_string())),
        }
    }
}

/// Outcome counts of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries appended to the store.
    pub imported: usize,
    /// Contacts skipped because their phone was already known.
    pub duplicates: usize,
    /// Entries that could not be parsed or failed validation.
    pub skipped: usize,
}

/// Imports a JSON array of contacts.
///
/// # Errors
/// Returns error if the data is not a JSON array, or on store failure.
pub fn import_contacts(store: &impl RecordStore, data: &[u8]) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, entry) in parse_array(data)?.into_iter().enumerate() {
        let raw: RawContact = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(index, "Skipping malformed contact: {}", e);
                report.skipped += 1;
                continue;
            }
        };

        let Some(phone) = raw.phone.into_string() else {
            tracing::warn!(index, "Skipping contact with non-integer phone number");
            report.skipped += 1;
            continue;
        };

        let draft = ContactDraft {
            name: raw.name,
            phone,
        };

        match submit_contact(store, &draft) {
            Ok(outcome) if outcome.is_created() => report.imported += 1,
            Ok(_) => report.duplicates += 1,
            Err(e) if e.is_validation() => {
                tracing::warn!(index, "Skipping invalid contact: {}", e);
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        imported = report.imported,
        duplicates = report.duplicates,
        skipped = report.skipped,
        "Contacts import finished"
    );

    Ok(report)
}

/// Imports a JSON array of messages.
///
/// # Errors
/// Returns error if the data is not a JSON array, or on store failure.
pub fn import_messages(store: &impl RecordStore, data: &[u8]) -> Result<ImportReport> {
    let mut report = ImportReport::default();

    for (index, entry) in parse_array(data)?.into_iter().enumerate() {
        let raw: RawMessage = match serde_json::from_value(entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(index, "Skipping malformed message: {}", e);
                report.skipped += 1;
                continue;
            }
        };

        let phone = match raw.phone.map(RawText::into_string) {
            Some(None) => {
                tracing::warn!(index, "Skipping message with non-integer phone number");
                report.skipped += 1;
                continue;
            }
            Some(Some(phone)) => Some(phone),
            None => None,
        };

        let draft = MessageDraft {
            name: raw.name,
            email: raw.email,
            phone,
            subject: raw.subject,
            body: raw.message,
        };

        match restore_message(store, &draft) {
            Ok(_) => report.imported += 1,
            Err(e) if e.is_validation() => {
                tracing::warn!(index, "Skipping invalid message: {}", e);
                report.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        imported = report.imported,
        skipped = report.skipped,
        "Messages import finished"
    );

    Ok(report)
}

fn parse_array(data: &[u8]) -> Result<Vec<serde_json::Value>> {
    let value: serde_json::Value = serde_json::from_slice(data).map_err(AppError::json_parse)?;
    match value {
        serde_json::Value::Array(entries) => Ok(entries),
        other => Err(AppError::InvalidData {
            message: format!("Expected a JSON array of records, found {}", json_kind(&other)),
        }),
    }
}

const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::export_messages_csv;
    use crate::domain::{Escaping, Subject};
    use crate::infrastructure::SqliteStore;

    #[test]
    fn test_import_contacts_normalizes_and_dedupes() {
        let store = SqliteStore::open_in_memory().unwrap();
        let data = br#"[
            {"name": "Jean", "phone": "+225 07-12-34"},
            {"name": "Ama (RXP)", "phone": 712},
            {"name": "Jean bis", "phone": "225 07 12 34"},
            {"name": "", "phone": "0101"},
            {"phone": "0202"}
        ]"#;

        let report = import_contacts(&store, data).unwrap();
        assert_eq!(
            report,
            ImportReport {
                imported: 2,
                duplicates: 1,
                skipped: 2
            }
        );

        let contacts = store.list_contacts().unwrap();
        assert_eq!(contacts[0].name, "Jean (RXP)");
        assert_eq!(contacts[0].phone, "225071234");
        assert_eq!(contacts[1].name, "Ama (RXP)");
        assert_eq!(contacts[1].phone, "712");
    }

    #[test]
    fn test_import_messages_reads_site_field_names() {
        let store = SqliteStore::open_in_memory().unwrap();
        let data = r#"[
            {"name": "Awa", "email": "awa@example.com", "subject": "support", "message": "Bonjour"},
            {"nom": "Yao", "email": "yao@example.com", "telephone": "0700", "sujet": "Devis", "message": "Un site"},
            {"name": "Vide", "email": "vide@example.com", "subject": "autre", "message": " "}
        ]"#;

        let report = import_messages(&store, data.as_bytes()).unwrap();
        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 1);

        let messages = store.list_messages().unwrap();
        assert_eq!(messages[0].subject, Subject::Support);
        assert_eq!(messages[0].body, "Bonjour");
        assert_eq!(messages[1].name, "Yao");
        assert_eq!(messages[1].phone.as_deref(), Some("0700"));
        assert_eq!(messages[1].subject, Subject::Other("Devis".to_string()));
    }

    #[test]
    fn test_import_rejects_non_array() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = import_contacts(&store, br#"{"contacts": []}"#).unwrap_err();
        assert!(matches!(err, AppError::InvalidData { .. }));

        let err = import_messages(&store, b"not json").unwrap_err();
        assert!(matches!(err, AppError::JsonParse { .. }));
    }

    #[test]
    fn test_imported_messages_reexport_byte_for_byte() {
        let store = SqliteStore::open_in_memory().unwrap();
        let data = r#"[
            {"name": " Awa", "email": "awa@example.com", "subject": "support", "message": "  Bonjour  "},
            {"name": "Yao ", "email": " yao@example.com", "subject": "Devis", "message": "Un site\t"}
        ]"#;

        let report = import_messages(&store, data.as_bytes()).unwrap();
        assert_eq!(report.imported, 2);

        let csv = export_messages_csv(&store.list_messages().unwrap(), Escaping::Legacy);
        assert_eq!(
            csv,
            "Nom,Email,Sujet,Message\n Awa,awa@example.com,support,  Bonjour  \nYao , yao@example.com,Devis,Un site\t"
        );
    }

    #[test]
    fn test_import_skips_fractional_phone_numbers() {
        let store = SqliteStore::open_in_memory().unwrap();
        let contacts = br#"[
            {"name": "Float", "phone": 2250712.0},
            {"name": "Int", "phone": 2250712}
        ]"#;

        let report = import_contacts(&store, contacts).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.list_contacts().unwrap()[0].phone, "2250712");

        let messages = br#"[
            {"name": "Awa", "email": "a@example.com", "phone": 1.5, "subject": "autre", "message": "x"}
        ]"#;
        let report = import_messages(&store, messages).unwrap();
        assert_eq!(report.skipped, 1);
        assert_eq!(store.stats().unwrap().messages, 0);
    }
}
