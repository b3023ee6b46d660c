pub mod error;
pub mod http_client;
pub mod traits;
pub mod types;

pub use error::{ApiError, Result as ApiResult};
pub use http_client::HttpApiClient;
pub use traits::{AuthApi, ProfileApi};
pub use types::auth_response::AuthResponse;
pub use types::profile_update::ProfileUpdate;
pub use types::register_request::RegisterRequest;
pub use types::role_switch_response::RoleSwitchResponse;
