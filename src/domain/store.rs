//! Record store capability.
//!
//! Services receive a store explicitly instead of reading any ambient
//! storage, so they can be exercised against an in-memory database.

use super::{Contact, Message, RecordStats, Result};

/// Append-only storage of contacts and messages.
///
/// `list_*` must return records in insertion order so exports are
/// deterministic.
pub trait RecordStore {
    /// Appends one contact.
    ///
    /// # Errors
    /// Returns error if the record cannot be persisted.
    fn append_contact(&self, contact: &Contact) -> Result<()>;

    /// Appends one message.
    ///
    /// # Errors
    /// Returns error if the record cannot be persisted.
    fn append_message(&self, message: &Message) -> Result<()>;

    /// Lists all contacts in insertion order.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn list_contacts(&self) -> Result<Vec<Contact>>;

    /// Lists all messages in insertion order.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn list_messages(&self) -> Result<Vec<Message>>;

    /// Finds the first contact with exactly this (normalized) phone.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn find_contact_by_phone(&self, phone: &str) -> Result<Option<Contact>>;

    /// Record totals.
    ///
    /// # Errors
    /// Returns error if the store cannot be read.
    fn stats(&self) -> Result<RecordStats>;
}
