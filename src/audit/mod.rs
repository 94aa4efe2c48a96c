//! Audit logging for fairshare
//!
//! Every create, update and delete that goes through the local store is
//! appended to `audit.log` as one JSON line, with before/after snapshots
//! and a short change summary for updates.
//!
//! - `AuditEntry`: one logged operation
//! - `AuditLogger`: appends and reads the JSONL file
//! - `describe_changes`: field-level summary between two snapshots

mod diff;
mod entry;
mod logger;

pub use diff::describe_changes;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
