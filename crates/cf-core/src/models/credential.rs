use serde::{Deserialize, Serialize};

/// Opaque bearer token authenticating one account.
///
/// Issued by the authentication API on login/register and never
/// inspected client-side; the server revoking it is detected only on
/// the next request that uses it.
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Token value must never reach logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential(len={})", self.0.len())
    }
}
