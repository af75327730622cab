use ahash::AHashMap;
use std::sync::Arc;

use crate::engine::types::{BookError, SignatureCommand, SignatureDetails};
use tracing::{debug, instrument, trace, warn};

pub type SharedBook = Arc<parking_lot::Mutex<SignatureBook>>;

/// Signed orders per account: offerer -> id -> record.
///
/// Every record is filed under its own `offerer`. Removing the last record of
/// an account keeps the (now empty) account partition around.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureBook {
    accounts: AHashMap<String, AHashMap<String, SignatureDetails>>,
}

impl SignatureBook {
    pub fn new() -> Self {
        Self { accounts: AHashMap::new() }
    }

    pub fn shared() -> SharedBook {
        Arc::new(parking_lot::Mutex::new(Self::new()))
    }

    /// Insert-if-absent. Returns `false` (and leaves the book untouched) when a
    /// record with the same offerer and id is already tracked.
    #[instrument(level = "debug", skip_all, fields(offerer = %signature.offerer, id = %signature.id))]
    pub fn add(&mut self, signature: SignatureDetails) -> bool {
        let account = self.accounts.entry(signature.offerer.clone()).or_default();
        if account.contains_key(&signature.id) {
            trace!("Signature already tracked, ignoring add");
            return false;
        }
        account.insert(signature.id.clone(), signature);
        debug!("Added signature");
        true
    }

    /// Replace an existing record wholesale.
    #[instrument(level = "debug", skip_all, fields(offerer = %signature.offerer, id = %signature.id))]
    pub fn update(&mut self, signature: SignatureDetails) -> Result<(), BookError> {
        let slot = self
            .accounts
            .get_mut(&signature.offerer)
            .and_then(|account| account.get_mut(&signature.id));

        match slot {
            Some(existing) => {
                debug!(from = ?existing.status, to = ?signature.status, "Updated signature");
                *existing = signature;
                Ok(())
            }
            None => {
                let error = BookError::NotFound {
                    offerer: signature.offerer,
                    id: signature.id,
                };
                warn!(error = %error, "Rejecting update of untracked signature");
                Err(error)
            }
        }
    }

    /// Delete a record if present; absent records are ignored.
    #[instrument(level = "debug", skip_all, fields(offerer = %signature.offerer, id = %signature.id))]
    pub fn remove(&mut self, signature: &SignatureDetails) -> bool {
        let removed = self
            .accounts
            .get_mut(&signature.offerer)
            .and_then(|account| account.remove(&signature.id))
            .is_some();
        if removed {
            debug!("Removed signature");
        } else {
            trace!("Signature not tracked, nothing to remove");
        }
        removed
    }

    pub fn apply(&mut self, command: SignatureCommand) -> Result<(), BookError> {
        match command {
            SignatureCommand::Add(signature) => {
                self.add(signature);
                Ok(())
            }
            SignatureCommand::Update(signature) => self.update(signature),
            SignatureCommand::Remove(signature) => {
                self.remove(&signature);
                Ok(())
            }
        }
    }

    /// Make sure a (possibly empty) partition exists for `offerer`.
    pub fn add_account(&mut self, offerer: &str) {
        self.accounts.entry(offerer.to_string()).or_default();
    }

    pub fn get(&self, offerer: &str, id: &str) -> Option<&SignatureDetails> {
        self.accounts.get(offerer).and_then(|account| account.get(id))
    }

    pub fn signatures<'a>(&'a self, offerer: &str) -> impl Iterator<Item = &'a SignatureDetails> + 'a {
        self.accounts.get(offerer).into_iter().flat_map(|account| account.values())
    }

    /// Account partitions, including accounts whose records were all removed.
    pub fn accounts(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.accounts.values().map(|account| account.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }
}
