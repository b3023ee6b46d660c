use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    #[error("Request rejected ({code}): {message} {location}")]
    BadRequest {
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Server error ({status}): {message} {location}")]
    Server {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    #[error("Network error: {source} {location}")]
    Network {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Response decode failed: {source} {location}")]
    Decode {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Whether the server rejected the credential itself.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Whether the request may succeed on retry without any state change.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::Server { .. })
    }

    /// Server-provided message, for verbatim pass-through to the caller.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. }
            | Self::BadRequest { message, .. }
            | Self::NotFound { message, .. }
            | Self::Server { message, .. } => Some(message),
            Self::Network { .. } | Self::Decode { .. } => None,
        }
    }

    /// Creates Unauthorized error at caller location.
    #[track_caller]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates BadRequest error at caller location.
    #[track_caller]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: code.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates NotFound error at caller location.
    #[track_caller]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Server error at caller location.
    #[track_caller]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Network error at caller location.
    #[track_caller]
    pub fn network(source: reqwest::Error) -> Self {
        Self::Network {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Creates Decode error at caller location.
    #[track_caller]
    pub fn decode(source: reqwest::Error) -> Self {
        Self::Decode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
