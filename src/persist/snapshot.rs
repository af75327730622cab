//! Pure conversions between the in-memory `SignatureBook` and the serializable snapshot types.
//!
//! This file MUST NOT touch the filesystem. Only struct <-> struct mapping lives here.

use itertools::Itertools;

use crate::engine::book::SignatureBook;
use crate::engine::types::SignatureCommand;
use crate::persist::types::{
    PersistError, PersistResult, SnapshotAccount, SnapshotData, SNAPSHOT_SCHEMA_VERSION,
};

/// Build a `SnapshotData` from the current book, sorted by offerer then id.
pub fn from_book(book: &SignatureBook) -> SnapshotData {
    let accounts = book
        .accounts()
        .sorted()
        .map(|offerer| SnapshotAccount {
            offerer: offerer.to_string(),
            signatures: book
                .signatures(offerer)
                .sorted_by(|a, b| a.id.cmp(&b.id))
                .cloned()
                .collect(),
        })
        .collect();

    SnapshotData { version: SNAPSHOT_SCHEMA_VERSION, accounts }
}

/// Replace the book's contents with a previously saved snapshot.
///
/// The snapshot is validated first; on error the book is left as it was.
pub fn apply_to_book(book: &mut SignatureBook, snap: &SnapshotData) -> PersistResult<()> {
    if snap.version != SNAPSHOT_SCHEMA_VERSION {
        return Err(PersistError::FormatMismatch(format!(
            "snapshot schema version {} (expected {})",
            snap.version, SNAPSHOT_SCHEMA_VERSION
        )));
    }

    let mut restored = SignatureBook::new();
    for account in &snap.accounts {
        for sig in &account.signatures {
            if sig.offerer != account.offerer {
                return Err(PersistError::FormatMismatch(format!(
                    "signature {} of {} filed under account {}",
                    sig.id, sig.offerer, account.offerer
                )));
            }
            if !restored.add(sig.clone()) {
                return Err(PersistError::FormatMismatch(format!(
                    "duplicate signature {} for account {}",
                    sig.id, account.offerer
                )));
            }
        }
        if account.signatures.is_empty() {
            // keep empty partitions
            restored.add_account(&account.offerer);
        }
    }

    *book = restored;
    Ok(())
}

/// Apply journal commands in order, stopping at the first one that fails.
/// Returns the number of commands applied.
pub fn replay(book: &mut SignatureBook, commands: Vec<SignatureCommand>) -> PersistResult<usize> {
    let mut applied = 0;
    for (idx, command) in commands.into_iter().enumerate() {
        book.apply(command)
            .map_err(|source| PersistError::Replay { line: idx + 1, source })?;
        applied += 1;
    }
    Ok(applied)
}
