use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("Channel connect failed: {message} {location}")]
    ConnectFailed {
        message: String,
        location: ErrorLocation,
    },
}

impl ChannelError {
    /// Creates ConnectFailed error at caller location.
    #[track_caller]
    pub fn connect_failed(message: impl Into<String>) -> Self {
        Self::ConnectFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ChannelError>;
