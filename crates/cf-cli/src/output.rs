//! JSON views of session state for terminal output.
//!
//! Credentials never appear here; linked accounts are projected down
//! to their display fields.

use cf_core::UserRecord;
use cf_session::Session;

use serde_json::{json, Value};

pub(crate) fn user_value(user: &UserRecord) -> Value {
    json!({
        "id": user.id.as_str(),
        "email": user.email,
        "role": user.role.as_str(),
        "onboardingComplete": user.onboarding_complete,
        "profile": user.profile,
    })
}

pub(crate) fn session_value(session: &Session) -> Value {
    json!({
        "isAuthenticated": session.is_authenticated(),
        "activeUser": session.active_user.as_ref().map(user_value),
        "linkedAccounts": session.linked_accounts.len(),
    })
}

pub(crate) fn accounts_value(session: &Session) -> Value {
    let active_id = session.active_user.as_ref().map(|u| u.id.clone());

    let accounts: Vec<Value> = session
        .linked_accounts
        .iter()
        .map(|account| {
            json!({
                "id": account.id.as_str(),
                "email": account.email,
                "role": account.role.as_str(),
                "linkedAt": account.linked_at.to_rfc3339(),
                "active": Some(&account.id) == active_id.as_ref(),
            })
        })
        .collect();

    json!({ "accounts": accounts })
}
