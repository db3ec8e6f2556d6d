//! List command - render persisted ledger entries with their ages.

use crate::cli::ListArgs;
use crate::error::Result;
use culler_ledger::{epoch_secs, ActivityLedger};
use std::path::Path;

/// Execute the list command.
pub fn execute_list(ledger_path: &Path, args: &ListArgs) -> Result<()> {
    let ledger = ActivityLedger::load_path(ledger_path)?;
    let now = epoch_secs();
    let total = ledger.len();

    let mut entries = ledger.entries();
    entries.sort_by_key(|(id, _)| *id);

    println!("{:<12} {:<12} AGE", "IDENTITY", "LAST-ACTIVE");

    let mut shown = 0;
    for (id, timestamp) in entries {
        let age = now.saturating_sub(timestamp);

        if let Some(min_idle) = args.idle_for {
            if age < min_idle {
                continue;
            }
        }

        println!("{:<12} {:<12} {}", id.value(), timestamp, format_age(age));
        shown += 1;
    }

    println!("{} of {} entries", shown, total);
    Ok(())
}

/// Render an idle duration in a human-scaled unit pair.
fn format_age(secs: u64) -> String {
    let days = secs / 86400;
    let hours = (secs % 86400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
