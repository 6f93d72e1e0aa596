pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use core::session::{
    extract_session, import_package, package_collection, package_session, scan_package,
    ImportedSession, NamedSessionBundle, Package, SessionBundle, SessionLibrary,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use utils::{Result, TutorError};
