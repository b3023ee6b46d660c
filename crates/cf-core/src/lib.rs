pub mod error;
pub mod models;

pub use error::{CoreError, Result as CoreResult};
pub use models::account_role::AccountRole;
pub use models::credential::Credential;
pub use models::linked_account::LinkedAccount;
pub use models::profile_data::ProfileData;
pub use models::user_id::UserId;
pub use models::user_record::UserRecord;

#[cfg(test)]
mod tests;
