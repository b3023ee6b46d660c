use cf_core::AccountRole;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: AccountRole,
}
