//! Intake of form submissions into the record store.
//!
//! Mirrors the two public forms: the community upload form (contacts, with
//! duplicate detection on the normalized phone) and the contact form
//! (messages, create-only).

use chrono::Utc;

use crate::domain::{Contact, ContactDraft, Message, MessageDraft, RecordStore, Result, Subject};

use super::normalizer::{normalize_contact, validate_contact, validate_message};

/// Result of submitting a contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The contact was stored.
    Created(Contact),
    /// A contact with the same normalized phone already exists.
    AlreadyExists(Contact),
}

impl SubmitOutcome {
    /// Whether a new record was appended.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Validates, normalizes and stores a contact unless its phone is known.
///
/// # Errors
/// Returns a validation error for blank input, or a store error.
pub fn submit_contact(store: &impl RecordStore, draft: &ContactDraft) -> Result<SubmitOutcome> {
    validate_contact(draft)?;

    let mut contact = normalize_contact(&draft.name, &draft.phone);

    if let Some(existing) = store.find_contact_by_phone(&contact.phone)? {
        tracing::info!(phone_tail = existing.phone_tail(), "Contact already exists");
        return Ok(SubmitOutcome::AlreadyExists(existing));
    }

    contact.created_at = Some(Utc::now());
    store.append_contact(&contact)?;
    tracing::info!(name = %contact.name, phone_tail = contact.phone_tail(), "Contact stored");

    Ok(SubmitOutcome::Created(contact))
}

/// Validates and stores a contact-form message, trimming its text fields.
///
/// # Errors
/// Returns a validation error if a required field is blank, or a store error.
pub fn submit_message(store: &impl RecordStore, draft: &MessageDraft) -> Result<Message> {
    validate_message(draft)?;
    let message = build_message(draft, str::trim);
    store.append_message(&message)?;
    tracing::info!(subject = %message.subject, "Message stored");
    Ok(message)
}

/// Validates and stores a message exactly as it was recorded by the site.
///
/// Only the subject is parsed and a blank phone dropped; text fields are
/// kept byte for byte so a re-export reproduces the original CSV rows.
///
/// # Errors
/// Returns a validation error if a required field is blank, or a store error.
pub fn restore_message(store: &impl RecordStore, draft: &MessageDraft) -> Result<Message> {
    validate_message(draft)?;
    let message = build_message(draft, |text| text);
    store.append_message(&message)?;
    tracing::debug!(subject = %message.subject, "Message restored");
    Ok(message)
}

fn build_message(draft: &MessageDraft, text: impl Fn(&str) -> &str) -> Message {
    let phone = draft
        .phone
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .map(|p| text(p).to_string());

    Message {
        name: text(&draft.name).to_string(),
        email: text(&draft.email).to_string(),
        phone,
        subject: Subject::from(draft.subject.clone()),
        body: text(&draft.body).to_string(),
        created_at: Some(Utc::now()),
    }
}
