use cf_api::ApiError;
use cf_config::ConfigError;
use cf_core::CoreError;
use cf_session::SessionError;
use cf_store::StoreError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Storage error: {source}")]
    Store {
        #[from]
        source: StoreError,
    },

    #[error("API client error: {source}")]
    Api {
        #[from]
        source: ApiError,
    },

    #[error("{source}")]
    Core {
        #[from]
        source: CoreError,
    },

    #[error("{message}")]
    Session { message: String },

    #[error("Failed to initialize logger: {message}")]
    Logger { message: String },
}

impl From<SessionError> for CliError {
    fn from(source: SessionError) -> Self {
        Self::Session {
            message: source.user_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
