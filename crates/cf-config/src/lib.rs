mod api_config;
mod client_config;
mod error;
mod log_level;
mod logging_config;
mod storage_config;

pub use api_config::ApiConfig;
pub use client_config::ClientConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use storage_config::StorageConfig;

const DEFAULT_API_BASE_URL: &str = "https://api.cofound.app";
const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_COLORED: bool = true;
const APP_DIR_NAME: &str = "cofound";

#[cfg(test)]
mod tests;
