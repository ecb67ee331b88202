//! Domain layer - core business types.
//!
//! This layer contains pure domain models, the store capability and error
//! types without any I/O of its own.

pub mod error;
pub mod models;
pub mod settings;
pub mod store;

pub use error::{AppError, Result};
pub use models::{
    Contact, ContactDraft, Message, MessageDraft, RecordStats, Subject, COMMUNITY_TAG,
};
pub use settings::{AppConfig, Escaping, ExportConfig};
pub use store::RecordStore;
