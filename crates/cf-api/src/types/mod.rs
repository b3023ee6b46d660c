pub mod auth_response;
pub mod profile_update;
pub mod register_request;
pub mod role_switch_response;
