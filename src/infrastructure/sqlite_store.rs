//! `SQLite` record store.
//!
//! Replaces the browser-local storage the site kept its records in. Rows are
//! append-only and listed by rowid, which keeps insertion order stable.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, Contact, Message, RecordStats, RecordStore, Result, Subject};

/// Record store backed by a single `SQLite` database.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the record database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create data directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::database)?;

        tracing::debug!(path = %path.display(), "Opened record store");

        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Opens a throwaway in-memory store.
    ///
    /// # Errors
    /// Returns error if schema creation fails.
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::database)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                created_at TEXT
            );

            CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT,
                subject TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_contacts_phone ON contacts(phone);
            ",
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    fn row_to_contact(row: &rusqlite::Row) -> rusqlite::Result<Contact> {
        let created_at: Option<String> = row.get(2)?;
        Ok(Contact {
            name: row.get(0)?,
            phone: row.get(1)?,
            created_at: parse_timestamp(created_at),
        })
    }

    fn row_to_message(row: &rusqlite::Row) -> rusqlite::Result<Message> {
        let subject: String = row.get(3)?;
        let created_at: Option<String> = row.get(5)?;
        Ok(Message {
            name: row.get(0)?,
            email: row.get(1)?,
            phone: row.get(2)?,
            subject: Subject::from(subject),
            body: row.get(4)?,
            created_at: parse_timestamp(created_at),
        })
    }

    fn count(&self, table: &str) -> Result<usize> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get::<_, i64>(0)
            })
            .map(|c| usize::try_from(c).unwrap_or_default())
            .map_err(AppError::database)
    }
}

impl RecordStore for SqliteStore {
    fn append_contact(&self, contact: &Contact) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO contacts (name, phone, created_at) VALUES (?1, ?2, ?3)",
                params![
                    &contact.name,
                    &contact.phone,
                    contact.created_at.map(|dt| dt.to_rfc3339()),
                ],
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    fn append_message(&self, message: &Message) -> Result<()> {
        self.conn
            .execute(
                r"
            INSERT INTO messages (name, email, phone, subject, body, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
                params![
                    &message.name,
                    &message.email,
                    &message.phone,
                    message.subject.value(),
                    &message.body,
                    message.created_at.map(|dt| dt.to_rfc3339()),
                ],
            )
            .map_err(AppError::database)?;

        Ok(())
    }

    fn list_contacts(&self) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, phone, created_at FROM contacts ORDER BY id ASC")
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([], Self::row_to_contact)
            .map_err(AppError::database)?;

        let contacts = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(AppError::database)?;

        tracing::debug!("Listed {} contacts", contacts.len());
        Ok(contacts)
    }

    fn list_messages(&self) -> Result<Vec<Message>> {
        let mut stmt = self
            .conn
            .prepare(
                r"
            SELECT name, email, phone, subject, body, created_at
            FROM messages
            ORDER BY id ASC
            ",
            )
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([], Self::row_to_message)
            .map_err(AppError::database)?;

        let messages = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(AppError::database)?;

        tracing::debug!("Listed {} messages", messages.len());
        Ok(messages)
    }

    fn find_contact_by_phone(&self, phone: &str) -> Result<Option<Contact>> {
        self.conn
            .query_row(
                "SELECT name, phone, created_at FROM contacts WHERE phone = ?1 ORDER BY id LIMIT 1",
                [phone],
                Self::row_to_contact,
            )
            .optional()
            .map_err(AppError::database)
    }

    fn stats(&self) -> Result<RecordStats> {
        Ok(RecordStats {
            contacts: self.count("contacts")?,
            messages: self.count("messages")?,
        })
    }
}

fn parse_timestamp(value: Option<String>) -> Option<DateTime<Utc>> {
    value
        .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn contact(name: &str, phone: &str) -> Contact {
        Contact {
            name: name.to_string(),
            phone: phone.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    #[test]
    fn test_open_creates_schema() {
        let dir = tempdir().unwrap();
        let store = SqliteStore::open(&dir.path().join("nested").join("leads.db")).unwrap();

        let count: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('contacts', 'messages')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(count, 2);
    }

    #[test]
    fn test_contacts_list_in_insertion_order() {
        let store = SqliteStore::open_in_memory().unwrap();
        for (name, phone) in [("Zoe (RXP)", "3"), ("Ama (RXP)", "1"), ("Kofi (RXP)", "2")] {
            store.append_contact(&contact(name, phone)).unwrap();
        }

        let names: Vec<String> = store
            .list_contacts()
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Zoe (RXP)", "Ama (RXP)", "Kofi (RXP)"]);
    }

    #[test]
    fn test_find_contact_by_phone_is_exact() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.append_contact(&contact("Jean (RXP)", "225071234")).unwrap();

        assert!(store.find_contact_by_phone("225071234").unwrap().is_some());
        assert!(store.find_contact_by_phone("22507123").unwrap().is_none());
    }

    #[test]
    fn test_message_roundtrip_keeps_subject_and_phone() {
        let store = SqliteStore::open_in_memory().unwrap();
        let message = Message {
            name: "Yao".to_string(),
            email: "yao@example.com".to_string(),
            phone: None,
            subject: Subject::Other("Devis".to_string()),
            body: "Un site vitrine".to_string(),
            created_at: Some(Utc::now()),
        };
        store.append_message(&message).unwrap();

        assert_eq!(store.list_messages().unwrap(), vec![message]);
        assert_eq!(
            store.stats().unwrap(),
            RecordStats {
                contacts: 0,
                messages: 1
            }
        );
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leads.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.append_contact(&contact("Ama (RXP)", "0712")).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.stats().unwrap().contacts, 1);
    }
}
