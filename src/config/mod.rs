use serde::{Deserialize, Serialize};

pub mod defaults;
pub mod manager;
pub mod validation;

pub use manager::ConfigManager;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub directories: DirectoryConfig,
    pub library: LibraryConfig,
    pub session: SessionConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct DirectoryConfig {
    pub library_dir: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LibraryConfig {
    pub index_key: String,
    pub payload_prefix: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SessionConfig {
    pub default_model: String,
    pub confirm_delete: bool,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Json(e) => write!(f, "JSON error: {}", e),
            ConfigError::Validation(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(error: std::io::Error) -> Self {
        ConfigError::Io(error)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        ConfigError::Json(error)
    }
}

impl Config {
    pub fn load_or_create() -> Result<Self> {
        ConfigManager::load_or_create()
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }

    pub fn get_library_dir(&self) -> &str {
        &self.directories.library_dir
    }

    pub fn get_index_key(&self) -> &str {
        &self.library.index_key
    }

    pub fn get_payload_prefix(&self) -> &str {
        &self.library.payload_prefix
    }

    pub fn should_confirm_delete(&self) -> bool {
        self.session.confirm_delete
    }
}
