use crate::config::Config;
use crate::core::session::SessionLibrary;
use crate::storage::{FileStore, StoreLock};
use crate::utils::Result;

pub fn open_library(config: &Config) -> SessionLibrary<FileStore> {
    let store = FileStore::new(config.get_library_dir());
    SessionLibrary::new(store, config.get_index_key(), config.get_payload_prefix())
}

/// Library plus the store-wide lock, for commands that mutate it. The lock
/// must stay alive for as long as the library is used.
pub fn open_library_locked(config: &Config) -> Result<(SessionLibrary<FileStore>, StoreLock)> {
    let store = FileStore::new(config.get_library_dir());
    let lock = store.lock()?;
    let library = SessionLibrary::new(store, config.get_index_key(), config.get_payload_prefix());
    Ok((library, lock))
}

pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
