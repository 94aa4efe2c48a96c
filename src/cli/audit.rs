//! Audit log CLI command

use crate::audit::AuditLogger;
use crate::config::FairsharePaths;
use crate::error::FairshareResult;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(paths: &FairsharePaths, limit: usize) -> FairshareResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(limit)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    println!("\nShowing {} entries from {}", entries.len(), logger.path().display());

    Ok(())
}
