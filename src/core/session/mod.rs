pub mod import;
pub mod library;
pub mod manifest;
pub mod package;
pub mod state;

pub use import::{extract_session, import_package, scan_package};
pub use library::{SessionLibrary, UNGROUPED_LABEL};
pub use manifest::{Manifest, MANIFEST_FILE_NAME, MANIFEST_VERSION};
pub use package::{package_collection, package_session, Package, PackageBuilder};
pub use state::{
    ChatEntry, ChatRole, ImportedSession, LibraryIndexEntry, NamedSessionBundle,
    PlaygroundArtifact, PlaygroundKind, SessionBundle, SyllabusRecord, Theme, WhiteboardRecord,
};
