use crate::models::account_role::AccountRole;
use crate::models::credential::Credential;
use crate::models::user_id::UserId;
use crate::models::user_record::UserRecord;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lightweight registry entry for an account that has authenticated on
/// this device, kept independently of which account is active.
///
/// The registry is unique by `id`; the session state upserts entries,
/// it never appends duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LinkedAccount {
    pub id: UserId,
    pub email: String,
    pub role: AccountRole,
    pub credential: Credential,
    pub linked_at: DateTime<Utc>,
}

impl LinkedAccount {
    /// Project a freshly authenticated user into a registry entry.
    pub fn from_user(user: &UserRecord, credential: Credential) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            credential,
            linked_at: Utc::now(),
        }
    }

    /// Refresh the cached projection after the account re-authenticates
    /// or its profile changes, preserving the original link time.
    pub fn refreshed(&self, user: &UserRecord, credential: Credential) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
            credential,
            linked_at: self.linked_at,
        }
    }
}
