//! Application layer - use cases and orchestration.
//!
//! Normalizes and stores form submissions, imports browser-storage dumps and
//! produces the VCF/CSV exports.

pub mod exporter;
pub mod formatter;
pub mod importer;
pub mod intake;
pub mod normalizer;

pub use exporter::{export_contacts_vcf, export_messages_csv, ExportKind};
pub use formatter::{
    format_contacts_table, format_messages_table, format_records_json, format_stats,
    format_subjects, OutputFormat,
};
pub use importer::{import_contacts, import_messages, ImportReport};
pub use intake::{submit_contact, submit_message, SubmitOutcome};
