use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Override for the session data directory. None = platform
    /// data dir.
    pub data_dir: Option<String>,
}
