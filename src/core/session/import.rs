use crate::core::session::manifest::{decode_manifest, MANIFEST_FILE_NAME};
use crate::core::session::package::Package;
use crate::core::session::state::{
    ImportedSession, PlaygroundArtifact, SessionBundle, WhiteboardRecord,
};
use crate::utils::{debug_log, Result, TutorError};

/// Root prefixes of every session the package holds: one per entry whose
/// path ends in the manifest file name. Works for flat single-session
/// archives (root `""`) and nested collection archives alike.
pub fn scan_package(package: &Package) -> Result<Vec<String>> {
    let roots: Vec<String> = package
        .file_names()?
        .into_iter()
        .filter_map(|name| {
            let prefix = name.strip_suffix(MANIFEST_FILE_NAME)?;
            if prefix.is_empty() || prefix.ends_with('/') {
                Some(prefix.to_string())
            } else {
                None
            }
        })
        .collect();

    if roots.is_empty() {
        return Err(TutorError::no_manifest_found());
    }
    Ok(roots)
}

/// Rebuild one session from its root. A missing or unparseable manifest is
/// a hard failure for this session only; a missing referenced content file
/// degrades to empty content for that record.
pub fn extract_session(package: &Package, root: &str) -> Result<SessionBundle> {
    let manifest_path = format!("{}{}", root, MANIFEST_FILE_NAME);
    let text = package.read_text(&manifest_path)?.ok_or_else(|| {
        TutorError::invalid_package(format!("Missing manifest at '{}'", manifest_path))
    })?;
    let manifest = decode_manifest(&text)?;

    let mut bundle = SessionBundle {
        theme: manifest.theme,
        model: manifest.model,
        chat_history: manifest.chat_history,
        whiteboards: Vec::with_capacity(manifest.whiteboards.len()),
        playgrounds: Vec::with_capacity(manifest.playgrounds.len()),
        syllabus: manifest.syllabus,
    };

    for entry in manifest.whiteboards {
        let svg_content = read_referenced_file(package, root, &entry.file_path);
        bundle.whiteboards.push(WhiteboardRecord {
            id: entry.id,
            topic: entry.topic,
            svg_content,
            explanation: entry.explanation,
            timestamp: entry.timestamp,
        });
    }

    for entry in manifest.playgrounds {
        let kind = entry.kind_or_inferred();
        let html = read_referenced_file(package, root, &entry.file_path);
        bundle.playgrounds.push(PlaygroundArtifact {
            id: entry.id,
            html,
            description: entry.description,
            timestamp: entry.timestamp,
            kind,
        });
    }

    Ok(bundle)
}

fn read_referenced_file(package: &Package, root: &str, file_path: &str) -> String {
    let full_path = format!("{}{}", root, file_path);
    match package.read_text(&full_path) {
        Ok(Some(content)) => content,
        Ok(None) => {
            debug_log(&format!("Referenced file missing from package: {}", full_path));
            String::new()
        }
        Err(e) => {
            debug_log(&format!("Failed to read {}: {}", full_path, e));
            String::new()
        }
    }
}

/// Best effort across sessions, all-or-nothing within a session: every
/// discovered root is attempted, failures are logged and skipped.
/// `package_name` (the archive's own file name minus extension) names a
/// session found at the anonymous top-level root.
pub fn import_package(package: &Package, package_name: &str) -> Result<Vec<ImportedSession>> {
    let roots = scan_package(package)?;
    let mut sessions = Vec::new();
    let mut skipped = 0usize;

    for root in &roots {
        match extract_session(package, root) {
            Ok(bundle) => {
                let (name, group) = derive_name_and_group(root, package_name);
                sessions.push(ImportedSession {
                    name,
                    group,
                    bundle,
                });
            }
            Err(e) => {
                skipped += 1;
                debug_log(&format!("Skipping session at '{}': {}", root, e));
            }
        }
    }

    if sessions.is_empty() && skipped > 0 {
        // Manifests were present but none parsed; there is nothing to import.
        return Err(TutorError::no_manifest_found());
    }
    Ok(sessions)
}

/// Split a root path into (name, group): the last segment names the
/// session, anything before it is the group, and an empty root falls back
/// to the archive's own name.
fn derive_name_and_group(root: &str, package_name: &str) -> (String, Option<String>) {
    let segments: Vec<&str> = root.split('/').filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [] => (package_name.to_string(), None),
        [name] => ((*name).to_string(), None),
        [group @ .., name] => ((*name).to_string(), Some(group.join("/"))),
    }
}
