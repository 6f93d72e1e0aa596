use super::{Config, DirectoryConfig, LibraryConfig, SessionConfig};

pub fn default_config() -> Config {
    Config {
        directories: default_directory_config(),
        library: default_library_config(),
        session: default_session_config(),
    }
}

pub fn default_directory_config() -> DirectoryConfig {
    DirectoryConfig {
        library_dir: get_default_library_dir().to_string_lossy().to_string(),
    }
}

pub fn default_library_config() -> LibraryConfig {
    LibraryConfig {
        index_key: "tutor_library_index".to_string(),
        payload_prefix: "tutor_session_".to_string(),
    }
}

pub fn default_session_config() -> SessionConfig {
    SessionConfig {
        default_model: "tutor-small".to_string(),
        confirm_delete: true,
    }
}

pub fn get_default_library_dir() -> std::path::PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "tutor") {
        proj_dirs.data_dir().join("library")
    } else {
        std::path::PathBuf::from(".")
            .join(".tutor")
            .join("library")
    }
}

pub fn get_default_config_dir() -> std::path::PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "tutor") {
        proj_dirs.config_dir().to_path_buf()
    } else {
        std::path::PathBuf::from(".").join(".tutor")
    }
}

pub fn get_config_file_path() -> std::path::PathBuf {
    // Allow environment variable override for config path (used in tests)
    if let Ok(config_path) = std::env::var("TUTOR_CONFIG_PATH") {
        return std::path::PathBuf::from(config_path);
    }

    get_default_config_dir().join("config.json")
}
