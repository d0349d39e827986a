//! CLI command handler for the audit history

use crate::audit::AuditLogger;
use crate::config::CardsplitPaths;
use crate::error::CardsplitResult;

/// Handle the history command
pub fn handle_history_command(paths: &CardsplitPaths, count: usize) -> CardsplitResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    let entries = logger.read_recent(count)?;

    if entries.is_empty() {
        println!("No audit entries found.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
