use thiserror::Error;

pub type Result<T> = std::result::Result<T, TutorError>;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("No session manifest found in package")]
    NoManifestFound,

    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Storage full: {message}")]
    StorageFull { message: String },

    #[error("Invalid package: {message}")]
    InvalidPackage { message: String },

    #[error("File operation failed: {message}")]
    FileOperation { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid session name '{name}': {reason}")]
    InvalidSessionName { name: String, reason: String },

    #[error("Invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("State corruption: {message}")]
    StateCorruption { message: String },

    #[error("General error: {0}")]
    Other(#[from] anyhow::Error),
}

impl TutorError {
    pub fn no_manifest_found() -> Self {
        TutorError::NoManifestFound
    }

    pub fn session_not_found(id: impl Into<String>) -> Self {
        TutorError::SessionNotFound { id: id.into() }
    }

    pub fn storage_full(message: impl Into<String>) -> Self {
        TutorError::StorageFull {
            message: message.into(),
        }
    }

    pub fn invalid_package(message: impl Into<String>) -> Self {
        TutorError::InvalidPackage {
            message: message.into(),
        }
    }

    pub fn file_operation(message: impl Into<String>) -> Self {
        TutorError::FileOperation {
            message: message.into(),
        }
    }

    pub fn config_error(message: impl Into<String>) -> Self {
        TutorError::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_session_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        TutorError::InvalidSessionName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_args(message: impl Into<String>) -> Self {
        TutorError::InvalidArgs {
            message: message.into(),
        }
    }

    pub fn state_corruption(message: impl Into<String>) -> Self {
        TutorError::StateCorruption {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for TutorError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::StorageFull | std::io::ErrorKind::QuotaExceeded => {
                TutorError::StorageFull {
                    message: error.to_string(),
                }
            }
            _ => TutorError::FileOperation {
                message: error.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for TutorError {
    fn from(error: serde_json::Error) -> Self {
        TutorError::StateCorruption {
            message: error.to_string(),
        }
    }
}

impl From<zip::result::ZipError> for TutorError {
    fn from(error: zip::result::ZipError) -> Self {
        TutorError::InvalidPackage {
            message: error.to_string(),
        }
    }
}
