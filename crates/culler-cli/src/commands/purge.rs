//! Purge command - drop entries idle past a threshold, offline.

use crate::cli::PurgeArgs;
use crate::error::Result;
use culler_ledger::{epoch_secs, ActivityLedger};
use std::path::Path;

/// Execute the purge command.
///
/// Rewrites the persisted file without entries idle longer than
/// `--older-than` seconds. This is the offline counterpart of the running
/// service's reclamation: it drops records only, it cannot destroy members.
pub fn execute_purge(ledger_path: &Path, args: &PurgeArgs) -> Result<()> {
    let ledger = ActivityLedger::load_path(ledger_path)?;
    let now = epoch_secs();
    let total = ledger.len();

    let mut kept = ActivityLedger::new();
    let mut purged = 0;

    for (id, timestamp) in ledger.entries() {
        if now.saturating_sub(timestamp) > args.older_than {
            purged += 1;
            if args.dry_run {
                println!("would purge {} (last active {})", id, timestamp);
            }
        } else {
            kept.touch_at(id, timestamp);
        }
    }

    if args.dry_run {
        println!("Would purge {} of {} entries", purged, total);
        return Ok(());
    }

    kept.save_path(ledger_path)?;
    println!("Purged {} of {} entries", purged, total);
    Ok(())
}
