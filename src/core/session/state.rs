use crate::utils::names::{generate_record_id, now_millis};
use serde::{Deserialize, Serialize};

/// One generated diagram with its explanation, immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardRecord {
    pub id: String,
    pub topic: String,
    pub svg_content: String,
    pub explanation: String,
    pub timestamp: i64,
}

impl WhiteboardRecord {
    pub fn new(topic: String, svg_content: String, explanation: String) -> Self {
        Self {
            id: generate_record_id(),
            topic,
            svg_content,
            explanation,
            timestamp: now_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: i64,
}

impl ChatEntry {
    pub fn new(role: ChatRole, content: String) -> Self {
        Self {
            id: generate_record_id(),
            role,
            content,
            timestamp: now_millis(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaygroundKind {
    Practice,
    Assessment,
}

impl PlaygroundKind {
    /// Fallback for archives written before the kind field existed: the
    /// description is the only signal left.
    pub fn infer_from_description(description: &str) -> Self {
        let lowered = description.to_lowercase();
        if lowered.contains("level test") || lowered.starts_with("test:") {
            PlaygroundKind::Assessment
        } else {
            PlaygroundKind::Practice
        }
    }
}

/// A self-contained interactive HTML document generated for one exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaygroundArtifact {
    pub id: String,
    pub html: String,
    pub description: String,
    pub timestamp: i64,
    pub kind: PlaygroundKind,
}

impl PlaygroundArtifact {
    pub fn new(html: String, description: String, kind: PlaygroundKind) -> Self {
        Self {
            id: generate_record_id(),
            html,
            description,
            timestamp: now_millis(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusRecord {
    pub level: String,
    pub topic: String,
    pub description: String,
    pub concepts: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The in-memory state of one learning session; materialized into a
/// manifest plus content files only at export/save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionBundle {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub chat_history: Vec<ChatEntry>,
    #[serde(default)]
    pub whiteboards: Vec<WhiteboardRecord>,
    #[serde(default)]
    pub playgrounds: Vec<PlaygroundArtifact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syllabus: Option<SyllabusRecord>,
}

impl SessionBundle {
    pub fn new(theme: Theme, model: String) -> Self {
        Self {
            theme,
            model,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.chat_history.is_empty()
            && self.whiteboards.is_empty()
            && self.playgrounds.is_empty()
            && self.syllabus.is_none()
    }
}

/// Export-collection input: a bundle plus its library name and optional group.
#[derive(Debug, Clone)]
pub struct NamedSessionBundle {
    pub name: String,
    pub group: Option<String>,
    pub bundle: SessionBundle,
}

/// One session recovered from a package, with its name and group derived
/// from the root path it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedSession {
    pub name: String,
    pub group: Option<String>,
    pub bundle: SessionBundle,
}

/// Metadata for one saved bundle in the library index. The timestamp is
/// save/import time, never content creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryIndexEntry {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub timestamp: i64,
    pub topic_count: usize,
}
