use std::panic::Location;

use cf_api::ApiError;
use cf_core::UserId;
use cf_store::StoreError;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("No active session {location}")]
    NotAuthenticated { location: ErrorLocation },

    #[error("Account {id} is not linked on this device {location}")]
    AccountNotFound { id: UserId, location: ErrorLocation },

    #[error("Stored credential rejected by the server {location}")]
    SessionExpired { location: ErrorLocation },

    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request rejected ({code}): {message} {location}")]
    Api {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network failure: {message} {location}")]
    Network {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session persistence failed: {source} {location}")]
    Storage {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },

    #[error("Failed to serialize session state: {source} {location}")]
    Serialization {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl SessionError {
    /// Message suitable for direct display to the user.
    ///
    /// Server-side business rejections pass the server's message
    /// through verbatim; everything else maps to a stable string.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::NotAuthenticated { .. } => "You are not signed in.".to_string(),
            Self::AccountNotFound { .. } => {
                "That account is not linked on this device.".to_string()
            }
            Self::SessionExpired { .. } => "Session expired, please log in again.".to_string(),
            Self::Unauthorized { message, .. } | Self::Api { message, .. } => message.clone(),
            Self::Network { .. } => "Network error, please try again.".to_string(),
            Self::Storage { source, .. } => source.recovery_hint().to_string(),
            Self::Serialization { .. } => {
                "Internal error preparing session data. Please report this issue.".to_string()
            }
        }
    }

    /// Creates Validation error at caller location.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NotAuthenticated error at caller location.
    #[track_caller]
    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates AccountNotFound error at caller location.
    #[track_caller]
    pub fn account_not_found(id: &UserId) -> Self {
        Self::AccountNotFound {
            id: id.clone(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates SessionExpired error at caller location.
    #[track_caller]
    pub fn session_expired() -> Self {
        Self::SessionExpired {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Map an API failure into the session taxonomy.
    ///
    /// Contexts where an unauthorized response means the *active*
    /// credential died handle `ApiError::is_unauthorized` before
    /// reaching for this.
    #[track_caller]
    pub fn from_api(error: ApiError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match error {
            ApiError::Unauthorized { message, .. } => Self::Unauthorized { message, location },
            ApiError::BadRequest { code, message, .. } => Self::Api {
                code,
                message,
                location,
            },
            ApiError::NotFound { message, .. } => Self::Api {
                code: "NOT_FOUND".to_string(),
                message,
                location,
            },
            ApiError::Server { .. } | ApiError::Network { .. } | ApiError::Decode { .. } => {
                Self::Network {
                    message: error.to_string(),
                    location,
                }
            }
        }
    }
}

impl From<StoreError> for SessionError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for SessionError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
