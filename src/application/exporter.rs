//! Record export engine.
//!
//! Serializes contacts as vCard 3.0 and messages as CSV. Both functions are
//! pure: they only read the given snapshot and return the full file text.

use crate::domain::{Contact, Escaping, ExportConfig, Message};

/// Header row of the messages export. Phone is deliberately not exported.
pub const CSV_HEADER: [&str; 4] = ["Nom", "Email", "Sujet", "Message"];

/// Which record collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Contacts as VCF.
    Contacts,
    /// Messages as CSV.
    Messages,
}

impl ExportKind {
    /// MIME type of the produced file.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Contacts => "text/vcard",
            Self::Messages => "text/csv",
        }
    }

    /// Configured file name for this export.
    #[must_use]
    pub fn file_name(self, config: &ExportConfig) -> &str {
        match self {
            Self::Contacts => &config.contacts_file,
            Self::Messages => &config.messages_file,
        }
    }
}

impl std::str::FromStr for ExportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contacts" | "vcf" => Ok(Self::Contacts),
            "messages" | "csv" => Ok(Self::Messages),
            _ => Err(format!("Unknown export: {s}. Use: contacts, messages")),
        }
    }
}

/// Serializes contacts as concatenated vCard 3.0 blocks.
///
/// Each block ends with its own newline; no contacts yields an empty string.
#[must_use]
pub fn export_contacts_vcf(contacts: &[Contact], escaping: Escaping) -> String {
    let mut out = String::new();
    for contact in contacts {
        out.push_str("BEGIN:VCARD\nVERSION:3.0\n");
        out.push_str("FN:");
        out.push_str(&vcf_value(&contact.name, escaping));
        out.push('\n');
        out.push_str("TEL:");
        out.push_str(&vcf_value(&contact.phone, escaping));
        out.push('\n');
        out.push_str("END:VCARD\n");
    }
    out
}

/// Serializes messages as CSV: the header row, then one row per message.
///
/// Rows are joined by `\n` without a trailing newline.
#[must_use]
pub fn export_messages_csv(messages: &[Message], escaping: Escaping) -> String {
    let mut lines = Vec::with_capacity(messages.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for message in messages {
        let subject = message.subject.to_string();
        let fields = [
            message.name.as_str(),
            message.email.as_str(),
            subject.as_str(),
            message.body.as_str(),
        ];
        let row: Vec<String> = fields
            .iter()
            .map(|field| csv_field(field, escaping))
            .collect();
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// Escapes a vCard property value (RFC 6350 section 3.4) when required.
fn vcf_value(value: &str, escaping: Escaping) -> String {
    match escaping {
        Escaping::Legacy => value.to_string(),
        Escaping::Standard => {
            let mut out = String::with_capacity(value.len());
            let mut chars = value.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => out.push_str("\\\\"),
                    ',' => out.push_str("\\,"),
                    ';' => out.push_str("\\;"),
                    '\r' => {
                        if chars.peek() == Some(&'\n') {
                            chars.next();
                        }
                        out.push_str("\\n");
                    }
                    '\n' => out.push_str("\\n"),
                    _ => out.push(c),
                }
            }
            out
        }
    }
}

/// Quotes a CSV field (RFC 4180) when required.
fn csv_field(value: &str, escaping: Escaping) -> String {
    match escaping {
        Escaping::Legacy => value.to_string(),
        Escaping::Standard => {
            if value.contains([',', '"', '\r', '\n']) {
                format!("\"{}\"", value.replace('"', "\"\""))
            } else {
                value.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Subject;

    fn contact(name: &str, phone: &str) -> Contact {
        Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            created_at: None,
        }
    }

    fn message(name: &str, subject: Subject, body: &str) -> Message {
        Message {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: Some("0700000000".to_string()),
            subject,
            body: body.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_vcf_empty_collection_is_empty() {
        assert_eq!(export_contacts_vcf(&[], Escaping::Legacy), "");
        assert_eq!(export_contacts_vcf(&[], Escaping::Standard), "");
    }

    #[test]
    fn test_vcf_exact_bytes() {
        let contacts = [
            contact("Jean (RXP)", "225071234"),
            contact("Ama (RXP)", "0712"),
        ];
        let vcf = export_contacts_vcf(&contacts, Escaping::Legacy);
        assert_eq!(
            vcf,
            "BEGIN:VCARD\nVERSION:3.0\nFN:Jean (RXP)\nTEL:225071234\nEND:VCARD\n\
             BEGIN:VCARD\nVERSION:3.0\nFN:Ama (RXP)\nTEL:0712\nEND:VCARD\n"
        );
    }

    #[test]
    fn test_vcf_block_count_and_order() {
        let contacts: Vec<Contact> = (0..5)
            .map(|i| contact(&format!("Membre {i} (RXP)"), &format!("07{i}")))
            .collect();
        let vcf = export_contacts_vcf(&contacts, Escaping::Legacy);

        assert_eq!(vcf.matches("BEGIN:VCARD").count(), 5);
        assert_eq!(vcf.matches("END:VCARD").count(), 5);

        let names: Vec<&str> = vcf
            .lines()
            .filter_map(|line| line.strip_prefix("FN:"))
            .collect();
        let expected: Vec<&str> = contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_vcf_is_idempotent() {
        let contacts = [contact("Kofi (RXP)", "123"), contact("Kofi (RXP)", "123")];
        let first = export_contacts_vcf(&contacts, Escaping::Legacy);
        let second = export_contacts_vcf(&contacts, Escaping::Legacy);
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn test_vcf_legacy_passes_delimiters_through() {
        let vcf = export_contacts_vcf(&[contact("A;B,C (RXP)", "1")], Escaping::Legacy);
        assert!(vcf.contains("FN:A;B,C (RXP)\n"));
    }

    #[test]
    fn test_vcf_standard_escapes_value() {
        let vcf = export_contacts_vcf(
            &[contact("Doe, Jane; \\ x\r\ny (RXP)", "1")],
            Escaping::Standard,
        );
        assert!(vcf.contains("FN:Doe\\, Jane\\; \\\\ x\\ny (RXP)\n"));
        assert_eq!(vcf.lines().count(), 5);
    }

    #[test]
    fn test_csv_empty_collection_is_header_only() {
        assert_eq!(export_messages_csv(&[], Escaping::Legacy), "Nom,Email,Sujet,Message");
    }

    #[test]
    fn test_csv_rows_follow_header_in_order() {
        let messages = [
            message("Awa", Subject::Support, "Bonjour"),
            message("Yao", Subject::Other("Devis".to_string()), "Un site"),
        ];
        let csv = export_messages_csv(&messages, Escaping::Legacy);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Nom,Email,Sujet,Message");
        assert_eq!(lines[1], "Awa,awa@example.com,support,Bonjour");
        assert_eq!(lines[2], "Yao,yao@example.com,Devis,Un site");
        assert!(!csv.ends_with('\n'));
        assert!(!csv.contains("0700000000"));
    }

    #[test]
    fn test_csv_legacy_does_not_quote() {
        let messages = [message("Awa", Subject::Autre, "oui, \"merci\"")];
        let csv = export_messages_csv(&messages, Escaping::Legacy);
        assert!(csv.ends_with("Awa,awa@example.com,autre,oui, \"merci\""));
    }

    #[test]
    fn test_csv_standard_quotes_special_fields() {
        let messages = [message("Awa", Subject::Autre, "oui, \"merci\"\nà bientôt")];
        let csv = export_messages_csv(&messages, Escaping::Standard);
        assert!(csv.ends_with("Awa,awa@example.com,autre,\"oui, \"\"merci\"\"\nà bientôt\""));
    }

    #[test]
    fn test_csv_is_idempotent() {
        let messages = [message("Awa", Subject::Partenariat, "Salut")];
        assert_eq!(
            export_messages_csv(&messages, Escaping::Standard),
            export_messages_csv(&messages, Escaping::Standard)
        );
    }

    #[test]
    fn test_export_kind() {
        let config = ExportConfig::default();
        assert_eq!("contacts".parse::<ExportKind>(), Ok(ExportKind::Contacts));
        assert_eq!("CSV".parse::<ExportKind>(), Ok(ExportKind::Messages));
        assert!("pdf".parse::<ExportKind>().is_err());
        assert_eq!(ExportKind::Contacts.mime_type(), "text/vcard");
        assert_eq!(ExportKind::Messages.file_name(&config), "messages.csv");
    }
}
