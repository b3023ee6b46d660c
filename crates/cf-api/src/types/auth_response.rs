use cf_core::{Credential, UserRecord};

use serde::Deserialize;

/// Response to both register and login.
///
/// `verification_required` is only ever set by register (investor
/// accounts go through a verification flow); login leaves it absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub credential: Credential,
    pub user: UserRecord,
    #[serde(default)]
    pub verification_required: bool,
}
