use crate::core::session::state::{
    ChatEntry, PlaygroundKind, SessionBundle, SyllabusRecord, Theme,
};
use crate::utils::names::generate_record_id;
use crate::utils::{Result, TutorError};
use serde::{Deserialize, Serialize};

/// Schema version written into newly produced manifests.
pub const MANIFEST_VERSION: &str = "1.1";

/// File name every session root must contain.
pub const MANIFEST_FILE_NAME: &str = "session_manifest.json";

/// The durable index of one session: metadata plus relative paths to the
/// content files that live next to it. Large text blobs (SVG, HTML) are
/// never inlined here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default = "pre_versioned")]
    pub version: String,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub chat_history: Vec<ChatEntry>,
    #[serde(default)]
    pub whiteboards: Vec<WhiteboardManifestEntry>,
    pub playgrounds: Vec<PlaygroundManifestEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<SyllabusRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardManifestEntry {
    pub id: String,
    pub topic: String,
    pub explanation: String,
    pub timestamp: i64,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundManifestEntry {
    pub id: String,
    pub description: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PlaygroundKind>,
    pub file_path: String,
}

impl PlaygroundManifestEntry {
    /// Kind as recorded, or reconstructed from the description for entries
    /// written before the field existed.
    pub fn kind_or_inferred(&self) -> PlaygroundKind {
        self.kind
            .unwrap_or_else(|| PlaygroundKind::infer_from_description(&self.description))
    }
}

fn pre_versioned() -> String {
    "1.0".to_string()
}

/// On-disk shapes, tried in order: the current schema first, then the
/// legacy shape that predates the `playgrounds` array (a singular optional
/// `playground` object, or nothing at all).
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestOnDisk {
    Current(Manifest),
    Legacy(LegacyManifest),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyManifest {
    #[serde(default = "pre_versioned")]
    version: String,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    theme: Theme,
    #[serde(default)]
    model: String,
    #[serde(default)]
    chat_history: Vec<ChatEntry>,
    #[serde(default)]
    whiteboards: Vec<WhiteboardManifestEntry>,
    #[serde(default)]
    playground: Option<LegacyPlaygroundEntry>,
    #[serde(default)]
    syllabus: Option<SyllabusRecord>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyPlaygroundEntry {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    timestamp: Option<i64>,
    file_path: String,
}

impl From<LegacyManifest> for Manifest {
    fn from(legacy: LegacyManifest) -> Self {
        let playgrounds = legacy
            .playground
            .map(|p| {
                vec![PlaygroundManifestEntry {
                    id: p.id.unwrap_or_else(generate_record_id),
                    description: p.description,
                    timestamp: p.timestamp.unwrap_or(legacy.created_at),
                    kind: None,
                    file_path: p.file_path,
                }]
            })
            .unwrap_or_default();

        Manifest {
            version: legacy.version,
            created_at: legacy.created_at,
            theme: legacy.theme,
            model: legacy.model,
            chat_history: legacy.chat_history,
            whiteboards: legacy.whiteboards,
            playgrounds,
            syllabus: legacy.syllabus,
        }
    }
}

/// Parse manifest JSON, normalizing every accepted historical shape.
pub fn decode_manifest(text: &str) -> Result<Manifest> {
    let on_disk: ManifestOnDisk = serde_json::from_str(text)
        .map_err(|e| TutorError::invalid_package(format!("Unparseable manifest: {}", e)))?;
    Ok(match on_disk {
        ManifestOnDisk::Current(manifest) => manifest,
        ManifestOnDisk::Legacy(legacy) => legacy.into(),
    })
}

/// Pretty-printed UTF-8 JSON, the only encoding ever written to a package.
pub fn encode_manifest(manifest: &Manifest) -> Result<String> {
    let json = serde_json::to_string_pretty(manifest)?;
    Ok(json)
}

impl Manifest {
    /// Fresh current-version manifest carrying the bundle's inline data but
    /// no file entries yet; the package builder fills those in as it writes.
    pub fn for_bundle(bundle: &SessionBundle, created_at: i64) -> Self {
        Manifest {
            version: MANIFEST_VERSION.to_string(),
            created_at,
            theme: bundle.theme,
            model: bundle.model.clone(),
            chat_history: bundle.chat_history.clone(),
            whiteboards: Vec::new(),
            playgrounds: Vec::new(),
            syllabus: bundle.syllabus.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current_manifest_json() -> String {
        r#"{
            "version": "1.1",
            "createdAt": 1700000000000,
            "theme": "dark",
            "model": "tutor-large",
            "chatHistory": [
                {"id": "c1", "role": "user", "content": "hi", "timestamp": 1700000000001}
            ],
            "whiteboards": [
                {"id": "w1", "topic": "Limits", "explanation": "e", "timestamp": 1, "filePath": "whiteboards/limits_w1.svg"}
            ],
            "playgrounds": [
                {"id": "p1", "description": "Limits drill", "timestamp": 2, "kind": "practice", "filePath": "playgrounds/limits_drill_p1.html"}
            ]
        }"#
        .to_string()
    }

    #[test]
    fn test_decode_current_schema() {
        let manifest = decode_manifest(&current_manifest_json()).unwrap();
        assert_eq!(manifest.version, "1.1");
        assert_eq!(manifest.theme, Theme::Dark);
        assert_eq!(manifest.whiteboards.len(), 1);
        assert_eq!(manifest.playgrounds.len(), 1);
        assert_eq!(manifest.playgrounds[0].kind, Some(PlaygroundKind::Practice));
    }

    #[test]
    fn test_decode_accepts_absent_version() {
        let json = r#"{
            "createdAt": 5,
            "whiteboards": [],
            "playgrounds": []
        }"#;
        let manifest = decode_manifest(json).unwrap();
        assert_eq!(manifest.version, "1.0");
    }

    #[test]
    fn test_decode_legacy_singular_playground() {
        let json = r#"{
            "version": "1.0",
            "createdAt": 42,
            "model": "tutor-small",
            "whiteboards": [],
            "playground": {"description": "Algebra Level Test", "filePath": "playground.html"}
        }"#;
        let manifest = decode_manifest(json).unwrap();
        assert_eq!(manifest.playgrounds.len(), 1);

        let entry = &manifest.playgrounds[0];
        assert!(!entry.id.is_empty());
        assert_eq!(entry.timestamp, 42);
        assert_eq!(entry.kind, None);
        assert_eq!(entry.kind_or_inferred(), PlaygroundKind::Assessment);
    }

    #[test]
    fn test_decode_missing_playgrounds_yields_empty_list() {
        let json = r#"{"createdAt": 1, "whiteboards": []}"#;
        let manifest = decode_manifest(json).unwrap();
        assert!(manifest.playgrounds.is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_manifest("not json at all"),
            Err(TutorError::InvalidPackage { .. })
        ));
        assert!(matches!(
            decode_manifest(r#"["array", "not", "object"]"#),
            Err(TutorError::InvalidPackage { .. })
        ));
    }

    #[test]
    fn test_kind_inference_only_when_absent() {
        let entry = PlaygroundManifestEntry {
            id: "p1".to_string(),
            description: "Algebra Level Test".to_string(),
            timestamp: 0,
            kind: Some(PlaygroundKind::Practice),
            file_path: "playgrounds/x.html".to_string(),
        };
        // Recorded kind wins over what the description suggests.
        assert_eq!(entry.kind_or_inferred(), PlaygroundKind::Practice);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let manifest = decode_manifest(&current_manifest_json()).unwrap();
        let encoded = encode_manifest(&manifest).unwrap();
        assert!(encoded.contains("\"version\": \"1.1\""));

        let back = decode_manifest(&encoded).unwrap();
        assert_eq!(back, manifest);
    }
}
