use crate::{AccountRole, Credential, LinkedAccount, ProfileData, UserId, UserRecord};

use std::str::FromStr;

use chrono::Utc;

fn sample_user(id: &str, email: &str, role: AccountRole) -> UserRecord {
    UserRecord {
        id: UserId::from(id),
        email: email.to_string(),
        role,
        profile: ProfileData::default(),
        onboarding_complete: false,
        created_at: Utc::now(),
    }
}

// =========================================================================
// AccountRole
// =========================================================================

#[test]
fn given_role_when_as_str_then_matches_wire_format() {
    assert_eq!(AccountRole::Founder.as_str(), "FOUNDER");
    assert_eq!(AccountRole::Investor.as_str(), "INVESTOR");
    assert_eq!(AccountRole::Builder.as_str(), "BUILDER");
    assert_eq!(AccountRole::Lurker.as_str(), "LURKER");
}

#[test]
fn given_wire_string_when_from_str_then_parses_case_insensitively() {
    assert_eq!(
        AccountRole::from_str("FOUNDER").unwrap(),
        AccountRole::Founder
    );
    assert_eq!(
        AccountRole::from_str("investor").unwrap(),
        AccountRole::Investor
    );
    assert!(AccountRole::from_str("admin").is_err());
}

#[test]
fn given_role_when_serialized_then_uses_screaming_snake_case() {
    let json = serde_json::to_string(&AccountRole::Builder).unwrap();
    assert_eq!(json, r#""BUILDER""#);
}

#[test]
fn given_investor_when_requires_verification_then_true() {
    assert!(AccountRole::Investor.requires_verification());
    assert!(!AccountRole::Founder.requires_verification());
    assert!(!AccountRole::Builder.requires_verification());
    assert!(!AccountRole::Lurker.requires_verification());
}

// =========================================================================
// Credential
// =========================================================================

#[test]
fn given_credential_when_debug_formatted_then_token_is_redacted() {
    let credential = Credential::new("super-secret-bearer-token");
    let debug = format!("{:?}", credential);

    assert!(!debug.contains("super-secret-bearer-token"));
    assert!(debug.contains("Credential"));
}

#[test]
fn given_credential_when_serialized_then_transparent_string() {
    let credential = Credential::new("tok-123");
    let json = serde_json::to_string(&credential).unwrap();
    assert_eq!(json, r#""tok-123""#);
}

// =========================================================================
// UserRecord / LinkedAccount
// =========================================================================

#[test]
fn given_user_record_when_serialized_then_uses_camel_case_fields() {
    let user = sample_user("u-1", "a@x.com", AccountRole::Founder);
    let json = serde_json::to_string(&user).unwrap();

    assert!(json.contains("onboardingComplete"));
    assert!(json.contains("createdAt"));
}

#[test]
fn given_user_record_json_without_profile_when_deserialized_then_defaults() {
    let json = r#"{
        "id": "u-1",
        "email": "a@x.com",
        "role": "LURKER",
        "createdAt": "2026-01-01T00:00:00Z"
    }"#;
    let user: UserRecord = serde_json::from_str(json).unwrap();

    assert_eq!(user.profile, ProfileData::default());
    assert!(!user.onboarding_complete);
}

#[test]
fn given_user_when_projected_then_linked_account_carries_identity_fields() {
    let user = sample_user("u-1", "a@x.com", AccountRole::Investor);
    let account = LinkedAccount::from_user(&user, Credential::new("tok-1"));

    assert_eq!(account.id, user.id);
    assert_eq!(account.email, user.email);
    assert_eq!(account.role, user.role);
    assert_eq!(account.credential, Credential::new("tok-1"));
}

#[test]
fn given_linked_account_when_refreshed_then_updates_projection_keeps_link_time() {
    let user = sample_user("u-1", "a@x.com", AccountRole::Founder);
    let account = LinkedAccount::from_user(&user, Credential::new("tok-1"));

    let mut updated = sample_user("u-1", "new@x.com", AccountRole::Investor);
    updated.created_at = user.created_at;
    let refreshed = account.refreshed(&updated, Credential::new("tok-2"));

    assert_eq!(refreshed.id, account.id);
    assert_eq!(refreshed.email, "new@x.com");
    assert_eq!(refreshed.role, AccountRole::Investor);
    assert_eq!(refreshed.credential, Credential::new("tok-2"));
    assert_eq!(refreshed.linked_at, account.linked_at);
}
