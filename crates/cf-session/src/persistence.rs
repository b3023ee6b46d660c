//! Write-through persistence of session state to the durable store.
//!
//! Credential and user writes on commit paths are blocking: the
//! operation fails if they fail. Linked-list writes and sign-out
//! clears are best-effort; a failure there costs at most the last
//! registry refresh, never a mixed active session.

use crate::SessionResult;

use cf_core::{Credential, LinkedAccount, UserRecord};
use cf_store::{keys, KeyValueStore};

use std::sync::Arc;

use log::warn;

pub(crate) struct SessionStorage {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStorage {
    pub(crate) fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load one persisted value, treating unreadable or corrupted
    /// blobs as absent so a bad file can never wedge startup.
    fn load<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read '{key}' from store: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Persisted '{key}' is corrupted, treating as absent: {e}");
                None
            }
        }
    }

    pub(crate) fn load_credential(&self) -> Option<Credential> {
        self.load(keys::AUTH_TOKEN)
    }

    pub(crate) fn load_user(&self) -> Option<UserRecord> {
        self.load(keys::USER_DATA)
    }

    pub(crate) fn load_linked_accounts(&self) -> Vec<LinkedAccount> {
        self.load(keys::LINKED_ACCOUNTS).unwrap_or_default()
    }

    /// Persist the active credential and user. Blocking: callers on
    /// commit paths must fail the operation if this fails.
    ///
    /// The credential is written first; it is the authoritative half,
    /// and a crash between the two writes is healed by the `whoami`
    /// refresh on next startup.
    pub(crate) fn persist_active(
        &self,
        credential: &Credential,
        user: &UserRecord,
    ) -> SessionResult<()> {
        self.store
            .set(keys::AUTH_TOKEN, &serde_json::to_string(credential)?)?;
        self.store
            .set(keys::USER_DATA, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Persist a refreshed user record for the already-active
    /// credential. Blocking.
    pub(crate) fn persist_user(&self, user: &UserRecord) -> SessionResult<()> {
        self.store
            .set(keys::USER_DATA, &serde_json::to_string(user)?)?;
        Ok(())
    }

    /// Persist the full linked-account registry. Best-effort.
    pub(crate) fn persist_linked_accounts(&self, accounts: &[LinkedAccount]) {
        let serialized = match serde_json::to_string(accounts) {
            Ok(s) => s,
            Err(e) => {
                warn!("Failed to serialize linked accounts: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::LINKED_ACCOUNTS, &serialized) {
            warn!("Failed to persist linked accounts: {e}");
        }
    }

    /// Clear the active credential and user. Best-effort: local state
    /// must always be clearable.
    pub(crate) fn clear_active(&self) {
        if let Err(e) = self.store.remove(keys::AUTH_TOKEN) {
            warn!("Failed to clear stored credential: {e}");
        }
        if let Err(e) = self.store.remove(keys::USER_DATA) {
            warn!("Failed to clear stored user: {e}");
        }
    }

    /// Clear the linked-account registry. Best-effort.
    pub(crate) fn clear_linked_accounts(&self) {
        if let Err(e) = self.store.remove(keys::LINKED_ACCOUNTS) {
            warn!("Failed to clear linked accounts: {e}");
        }
    }
}
