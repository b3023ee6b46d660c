pub mod account_role;
pub mod credential;
pub mod linked_account;
pub mod profile_data;
pub mod user_id;
pub mod user_record;
