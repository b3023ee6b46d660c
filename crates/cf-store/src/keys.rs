//! Persisted-state layout: fixed keys for the session state blobs.

/// Active bearer credential string.
pub const AUTH_TOKEN: &str = "auth_token";

/// Serialized `UserRecord` of the active account.
pub const USER_DATA: &str = "user_data";

/// Serialized array of `LinkedAccount` entries.
pub const LINKED_ACCOUNTS: &str = "linked_accounts";
