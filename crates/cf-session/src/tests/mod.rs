
use cf_core::{AccountRole, ProfileData, UserId, UserRecord};

use chrono::Utc;

pub(crate) fn sample_user(id: &str, email: &str, role: AccountRole) -> UserRecord {
    UserRecord {
        id: UserId::from(id),
        email: email.to_string(),
        role,
        profile: ProfileData::default(),
        onboarding_complete: true,
        created_at: Utc::now(),
    }
}
