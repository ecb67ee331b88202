//! Domain models for collected leads.
//!
//! Contacts come from the community upload form, messages from the contact
//! form. Both are create-only: once stored they are never modified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Suffix tag appended to every community contact name.
pub const COMMUNITY_TAG: &str = " (RXP)";

/// A community member who left their name and phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, always ending with [`COMMUNITY_TAG`].
    pub name: String,
    /// Phone number, decimal digits only.
    pub phone: String,
    /// When the contact was recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Contact {
    /// Short phone suffix for display, e.g. `…1234`.
    #[must_use]
    pub fn phone_tail(&self) -> &str {
        self.phone
            .char_indices()
            .rev()
            .nth(3)
            .map_or(self.phone.as_str(), |(start, _)| &self.phone[start..])
    }
}

/// Subject of a contact-form message.
///
/// The form offers a fixed list; anything else is kept as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Subject {
    /// Technical support.
    Support,
    /// Sign-up problem.
    Inscription,
    /// Partnership request.
    Partenariat,
    /// Improvement suggestion.
    Suggestion,
    /// Anything else picked from the list.
    Autre,
    /// Free text not in the fixed list.
    Other(String),
}

impl Subject {
    /// The fixed subjects offered by the form, in display order.
    pub const FIXED: [Self; 5] = [
        Self::Support,
        Self::Inscription,
        Self::Partenariat,
        Self::Suggestion,
        Self::Autre,
    ];

    /// Stored value of the subject.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Support => "support",
            Self::Inscription => "inscription",
            Self::Partenariat => "partenariat",
            Self::Suggestion => "suggestion",
            Self::Autre => "autre",
            Self::Other(text) => text,
        }
    }

    /// Human-readable label shown by the form.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Support => "Support technique",
            Self::Inscription => "Problème d'inscription",
            Self::Partenariat => "Partenariat",
            Self::Suggestion => "Suggestion d'amélioration",
            Self::Autre => "Autre",
            Self::Other(text) => text,
        }
    }
}

impl std::str::FromStr for Subject {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let fixed = Self::FIXED.into_iter().find(|subject| {
            subject.value().eq_ignore_ascii_case(trimmed)
                || subject.label().to_lowercase() == trimmed.to_lowercase()
        });
        Ok(fixed.unwrap_or_else(|| Self::Other(trimmed.to_string())))
    }
}

impl From<String> for Subject {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(subject) => subject,
            Err(never) => match never {},
        }
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        match subject {
            Subject::Other(text) => text,
            fixed => fixed.value().to_string(),
        }
    }
}

impl std::fmt::Display for Subject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.value())
    }
}

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Sender name.
    pub name: String,
    /// Sender email.
    pub email: String,
    /// Optional sender phone, kept as typed.
    #[serde(default)]
    pub phone: Option<String>,
    /// Message subject.
    pub subject: Subject,
    /// Message text.
    pub body: String,
    /// When the message was recorded.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Raw upload-form input, before validation and normalization.
#[derive(Debug, Clone, Default)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
}

/// Raw contact-form input, before validation.
#[derive(Debug, Clone, Default)]
pub struct MessageDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub body: String,
}

/// Record totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RecordStats {
    /// Number of stored contacts.
    pub contacts: usize,
    /// Number of stored messages.
    pub messages: usize,
}
