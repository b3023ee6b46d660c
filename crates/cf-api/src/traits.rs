use crate::types::auth_response::AuthResponse;
use crate::types::profile_update::ProfileUpdate;
use crate::types::register_request::RegisterRequest;
use crate::types::role_switch_response::RoleSwitchResponse;
use crate::ApiResult;

use cf_core::{AccountRole, Credential, UserId, UserRecord};

use async_trait::async_trait;

/// Authentication API consumed by the session manager.
///
/// All calls carry the caller-supplied timeout configured on the
/// concrete client; none block indefinitely.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account and authenticate it in one step.
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    /// Authenticate an existing account.
    async fn login(&self, email: &str, password: &str) -> ApiResult<AuthResponse>;

    /// Fetch the user the credential authenticates. An `Unauthorized`
    /// error here is how a revoked credential is detected.
    async fn whoami(&self, credential: &Credential) -> ApiResult<UserRecord>;

    /// Invalidate the credential server-side.
    async fn logout(&self, credential: &Credential) -> ApiResult<()>;
}

/// Profile API consumed by the session manager.
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Apply a partial update and return the full updated record.
    async fn update_profile(
        &self,
        credential: &Credential,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> ApiResult<UserRecord>;

    /// Switch the account's role; the updated user must be re-fetched
    /// via `whoami` afterwards.
    async fn switch_role(
        &self,
        credential: &Credential,
        new_role: AccountRole,
    ) -> ApiResult<RoleSwitchResponse>;
}
