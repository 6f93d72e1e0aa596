use crate::core::session::manifest::{
    encode_manifest, Manifest, PlaygroundManifestEntry, WhiteboardManifestEntry,
    MANIFEST_FILE_NAME, MANIFEST_VERSION,
};
use crate::core::session::state::{NamedSessionBundle, SessionBundle};
use crate::utils::names::{now_millis, sanitize};
use crate::utils::{Result, TutorError};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::{write::FileOptions, CompressionMethod, ZipArchive, ZipWriter};

/// A portable archive holding one or more session roots. Entries use `/`
/// separators; the bytes are a standard deflate zip.
pub struct Package {
    bytes: Vec<u8>,
}

impl Package {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn read_from(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| {
            TutorError::file_operation(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self { bytes })
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    TutorError::file_operation(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        fs::write(path, &self.bytes).map_err(|e| {
            TutorError::file_operation(format!("Failed to write {}: {}", path.display(), e))
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Every file entry path in the archive, directories skipped.
    pub fn file_names(&self) -> Result<Vec<String>> {
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut names = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let entry = archive.by_index(i)?;
            if entry.is_dir() {
                continue;
            }
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    /// Text content of one entry, or `None` when the archive has no file at
    /// that path. Other read failures propagate.
    pub fn read_text(&self, path: &str) -> Result<Option<String>> {
        let mut archive = ZipArchive::new(Cursor::new(self.bytes.as_slice()))?;
        let mut entry = match archive.by_name(path) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut content = String::new();
        entry.read_to_string(&mut content).map_err(|e| {
            TutorError::invalid_package(format!("Failed to read entry {}: {}", path, e))
        })?;
        Ok(Some(content))
    }
}

/// Streams session trees into one zip, one root per session.
pub struct PackageBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl Default for PackageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write one session's manifest and content files under `root` (empty
    /// string or a `/`-terminated prefix).
    pub fn add_session(&mut self, root: &str, bundle: &SessionBundle) -> Result<()> {
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut manifest = Manifest::for_bundle(bundle, now_millis());
        debug_assert_eq!(manifest.version, MANIFEST_VERSION);

        for whiteboard in &bundle.whiteboards {
            // Sanitized topic plus a 6-char id prefix: collision-tolerant,
            // not collision-proof. Identical derived names overwrite.
            let id_prefix: String = whiteboard.id.chars().take(6).collect();
            let file_path = format!(
                "whiteboards/{}_{}.svg",
                sanitize(&whiteboard.topic),
                id_prefix
            );
            self.writer.start_file(format!("{}{}", root, file_path), options)?;
            self.writer.write_all(whiteboard.svg_content.as_bytes())?;
            manifest.whiteboards.push(WhiteboardManifestEntry {
                id: whiteboard.id.clone(),
                topic: whiteboard.topic.clone(),
                explanation: whiteboard.explanation.clone(),
                timestamp: whiteboard.timestamp,
                file_path,
            });
        }

        for playground in &bundle.playgrounds {
            let file_path = format!(
                "playgrounds/{}_{}.html",
                sanitize(&playground.description),
                playground.id
            );
            self.writer.start_file(format!("{}{}", root, file_path), options)?;
            self.writer.write_all(playground.html.as_bytes())?;
            manifest.playgrounds.push(PlaygroundManifestEntry {
                id: playground.id.clone(),
                description: playground.description.clone(),
                timestamp: playground.timestamp,
                kind: Some(playground.kind),
                file_path,
            });
        }

        let json = encode_manifest(&manifest)?;
        self.writer
            .start_file(format!("{}{}", root, MANIFEST_FILE_NAME), options)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<Package> {
        let cursor = self.writer.finish()?;
        Ok(Package::from_bytes(cursor.into_inner()))
    }
}

/// Package one bundle under a single anonymous root.
pub fn package_session(bundle: &SessionBundle) -> Result<Package> {
    let mut builder = PackageBuilder::new();
    builder.add_session("", bundle)?;
    builder.finish()
}

/// Package several named bundles, each isolated under
/// `sanitize(group)/sanitize(name)/` or `sanitize(name)/`.
pub fn package_collection(sessions: &[NamedSessionBundle]) -> Result<Package> {
    let mut builder = PackageBuilder::new();
    for session in sessions {
        let root = match &session.group {
            Some(group) => format!("{}/{}/", sanitize(group), sanitize(&session.name)),
            None => format!("{}/", sanitize(&session.name)),
        };
        builder.add_session(&root, &session.bundle)?;
    }
    builder.finish()
}
