//! Ingestion-time normalization and validation of form input.
//!
//! Validation always runs before normalization: the normalizing functions
//! are total and never reject input.

use crate::domain::{AppError, Contact, ContactDraft, MessageDraft, Result, COMMUNITY_TAG};

/// Shown when the upload form is missing its name or phone.
pub const CONTACT_REQUIRED_MSG: &str = "Veuillez remplir votre nom et votre numéro de téléphone.";

/// Shown when the contact form is missing a required field.
pub const MESSAGE_REQUIRED_MSG: &str = "Veuillez remplir tous les champs requis.";

/// Shown when a phone number has no digits left after sanitizing.
pub const PHONE_DIGITS_MSG: &str = "Le numéro de téléphone doit contenir au moins un chiffre.";

/// Strips every character that is not an ASCII decimal digit.
#[must_use]
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Trims the name and appends the community tag unless already present.
#[must_use]
pub fn tag_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.ends_with(COMMUNITY_TAG) {
        trimmed.to_string()
    } else {
        format!("{trimmed}{COMMUNITY_TAG}")
    }
}

/// Builds a normalized contact from raw form values.
///
/// Callers must reject blank input first (see [`validate_contact`]).
#[must_use]
pub fn normalize_contact(raw_name: &str, raw_phone: &str) -> Contact {
    Contact {
        name: tag_name(raw_name),
        phone: sanitize_phone(raw_phone),
        created_at: None,
    }
}

/// Checks the upload form's required fields.
///
/// # Errors
/// Returns a validation error if the name or phone is blank, or if the phone
/// contains no digit at all.
pub fn validate_contact(draft: &ContactDraft) -> Result<()> {
    if draft.name.trim().is_empty() || draft.phone.trim().is_empty() {
        return Err(AppError::validation(CONTACT_REQUIRED_MSG));
    }
    if !draft.phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(PHONE_DIGITS_MSG));
    }
    Ok(())
}

/// Checks the contact form's required fields (phone is optional).
///
/// # Errors
/// Returns a validation error if name, email, subject or body is blank.
pub fn validate_message(draft: &MessageDraft) -> Result<()> {
    let required = [&draft.name, &draft.email, &draft.subject, &draft.body];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(AppError::validation(MESSAGE_REQUIRED_MSG));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_tags_and_strips_phone() {
        let contact = normalize_contact("  Jean  ", "+225 07-12-34");
        assert_eq!(contact.name, "Jean (RXP)");
        assert_eq!(contact.phone, "225071234");
    }

    #[test]
    fn test_normalize_keeps_existing_tag() {
        let contact = normalize_contact("Ama (RXP)", "0712");
        assert_eq!(contact.name, "Ama (RXP)");
        assert_eq!(contact.phone, "0712");
    }

    #[test]
    fn test_tag_requires_full_suffix() {
        assert_eq!(tag_name("Kofi RXP"), "Kofi RXP (RXP)");
        assert_eq!(tag_name("Kofi(RXP)"), "Kofi(RXP) (RXP)");
        assert_eq!(tag_name("  Kofi (RXP)  "), "Kofi (RXP)");
    }

    #[test]
    fn test_sanitize_phone_drops_non_ascii_digits() {
        assert_eq!(sanitize_phone("(+1) 849.459.7173"), "18494597173");
        assert_eq!(sanitize_phone("٠١٢ 34"), "34");
        assert_eq!(sanitize_phone(""), "");
    }

    #[test]
    fn test_validate_contact_rejects_blank_fields() {
        let draft = ContactDraft {
            name: "   ".to_string(),
            phone: "0712".to_string(),
        };
        let err = validate_contact(&draft).unwrap_err();
        assert_eq!(err.to_string(), CONTACT_REQUIRED_MSG);

        let draft = ContactDraft {
            name: "Jean".to_string(),
            phone: String::new(),
        };
        assert!(validate_contact(&draft).is_err());
    }

    #[test]
    fn test_validate_contact_rejects_phone_without_digits() {
        let draft = ContactDraft {
            name: "Jean".to_string(),
            phone: "pas de numéro".to_string(),
        };
        let err = validate_contact(&draft).unwrap_err();
        assert_eq!(err.to_string(), PHONE_DIGITS_MSG);
    }

    #[test]
    fn test_validate_message_allows_missing_phone() {
        let mut draft = MessageDraft {
            name: "Awa".to_string(),
            email: "awa@example.com".to_string(),
            phone: None,
            subject: "support".to_string(),
            body: "Bonjour".to_string(),
        };
        assert!(validate_message(&draft).is_ok());

        draft.body = "  \n".to_string();
        let err = validate_message(&draft).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), MESSAGE_REQUIRED_MSG);
    }
}
