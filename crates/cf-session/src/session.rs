use cf_core::{Credential, LinkedAccount, UserId, UserRecord};

/// Process-wide session state, owned by the [`crate::SessionManager`]
/// and handed to callers as a snapshot.
///
/// `active_credential`, `active_user` and `linked_accounts` survive
/// restarts through the durable store; `is_loading` and `last_error`
/// are transient.
#[derive(Debug, Clone)]
pub struct Session {
    pub active_credential: Option<Credential>,
    pub active_user: Option<UserRecord>,
    pub linked_accounts: Vec<LinkedAccount>,
    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl Session {
    /// Fresh process-start state: loading, unauthenticated.
    pub fn new() -> Self {
        Self {
            active_credential: None,
            active_user: None,
            linked_accounts: Vec::new(),
            is_loading: true,
            last_error: None,
        }
    }

    /// Authenticated means both a credential and a cached user are
    /// present. Derived, so the two can never disagree with the flag.
    pub fn is_authenticated(&self) -> bool {
        self.active_credential.is_some() && self.active_user.is_some()
    }

    /// Look up a linked account by identifier.
    pub fn linked_account(&self, id: &UserId) -> Option<&LinkedAccount> {
        self.linked_accounts.iter().find(|a| &a.id == id)
    }

    /// Upsert the registry entry for `user`: replace the entry with the
    /// same id, else append. The registry stays unique by id.
    pub(crate) fn upsert_linked_account(&mut self, user: &UserRecord, credential: Credential) {
        match self.linked_accounts.iter_mut().find(|a| a.id == user.id) {
            Some(existing) => *existing = existing.refreshed(user, credential),
            None => self
                .linked_accounts
                .push(LinkedAccount::from_user(user, credential)),
        }
    }

    /// Remove the registry entry for `id`, reporting whether it existed.
    pub(crate) fn remove_linked_account(&mut self, id: &UserId) -> bool {
        let before = self.linked_accounts.len();
        self.linked_accounts.retain(|a| &a.id != id);
        self.linked_accounts.len() < before
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
