use crate::models::account_role::AccountRole;
use crate::models::profile_data::ProfileData;
use crate::models::user_id::UserId;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cached profile for one account, owned by the session manager.
///
/// Replaced wholesale on every successful fetch or update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub role: AccountRole,
    #[serde(default)]
    pub profile: ProfileData,
    #[serde(default)]
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
}
