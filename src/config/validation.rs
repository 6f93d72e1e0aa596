use super::{Config, ConfigError, DirectoryConfig, LibraryConfig, Result, SessionConfig};

pub fn validate_config(config: &Config) -> Result<()> {
    validate_directory_config(&config.directories)?;
    validate_library_config(&config.library)?;
    validate_session_config(&config.session)?;
    Ok(())
}

pub fn validate_directory_config(directories: &DirectoryConfig) -> Result<()> {
    if directories.library_dir.is_empty() {
        return Err(ConfigError::Validation(
            "Library directory cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_library_config(library: &LibraryConfig) -> Result<()> {
    if library.index_key.is_empty() {
        return Err(ConfigError::Validation(
            "Library index key cannot be empty".to_string(),
        ));
    }
    if library.payload_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "Payload key prefix cannot be empty".to_string(),
        ));
    }
    // Keys become file names in the backing store.
    for (label, value) in [
        ("index key", &library.index_key),
        ("payload prefix", &library.payload_prefix),
    ] {
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(ConfigError::Validation(format!(
                "Library {} may only contain letters, digits, underscores, and hyphens",
                label
            )));
        }
    }
    Ok(())
}

pub fn validate_session_config(session: &SessionConfig) -> Result<()> {
    if session.default_model.is_empty() {
        return Err(ConfigError::Validation(
            "Default model cannot be empty".to_string(),
        ));
    }
    Ok(())
}
