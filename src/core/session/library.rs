use crate::core::session::state::{LibraryIndexEntry, SessionBundle};
use crate::storage::KeyValueStore;
use crate::utils::names::{generate_record_id, now_millis, validate_session_name};
use crate::utils::{debug_log, Result, TutorError};
use std::collections::BTreeMap;

/// Reserved display bucket for entries saved without a group.
pub const UNGROUPED_LABEL: &str = "Ungrouped";

pub const DEFAULT_INDEX_KEY: &str = "tutor_library_index";
pub const DEFAULT_PAYLOAD_PREFIX: &str = "tutor_session_";

/// The persistent collection of saved bundles. The index entry and the
/// payload for an id are kept in lockstep: insert both or neither, delete
/// both together.
pub struct SessionLibrary<S: KeyValueStore> {
    store: S,
    index_key: String,
    payload_prefix: String,
}

impl<S: KeyValueStore> SessionLibrary<S> {
    pub fn new(store: S, index_key: impl Into<String>, payload_prefix: impl Into<String>) -> Self {
        Self {
            store,
            index_key: index_key.into(),
            payload_prefix: payload_prefix.into(),
        }
    }

    pub fn with_defaults(store: S) -> Self {
        Self::new(store, DEFAULT_INDEX_KEY, DEFAULT_PAYLOAD_PREFIX)
    }

    fn payload_key(&self, id: &str) -> String {
        format!("{}{}", self.payload_prefix, id)
    }

    pub fn entries(&self) -> Result<Vec<LibraryIndexEntry>> {
        match self.store.get(&self.index_key)? {
            None => Ok(Vec::new()),
            Some(text) => {
                let entries: Vec<LibraryIndexEntry> = serde_json::from_str(&text)?;
                Ok(entries)
            }
        }
    }

    fn write_index(&mut self, entries: &[LibraryIndexEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        self.store.set(&self.index_key, &json)
    }

    /// Persist a bundle under a fresh id. The payload is written first; the
    /// index is only committed once the payload write succeeded, and a
    /// failed index write takes the payload back down with it, so a
    /// rejected save leaves no trace.
    pub fn save(
        &mut self,
        bundle: &SessionBundle,
        name: &str,
        group: Option<&str>,
    ) -> Result<LibraryIndexEntry> {
        validate_session_name(name)?;

        let id = generate_record_id();
        let payload = serde_json::to_string(bundle)?;
        self.store.set(&self.payload_key(&id), &payload)?;

        let entry = LibraryIndexEntry {
            id: id.clone(),
            name: name.to_string(),
            group: group.map(str::to_string),
            timestamp: now_millis(),
            topic_count: bundle.whiteboards.len(),
        };

        if let Err(e) = self.append_to_index(entry.clone()) {
            let _ = self.store.remove(&self.payload_key(&id));
            return Err(e);
        }

        debug_log(&format!("Saved session '{}' as {}", name, id));
        Ok(entry)
    }

    fn append_to_index(&mut self, entry: LibraryIndexEntry) -> Result<()> {
        let mut entries = self.entries()?;
        entries.push(entry);
        self.write_index(&entries)
    }

    /// The payload is authoritative: an index entry whose payload is gone
    /// (external tampering) still reports `SessionNotFound`.
    pub fn load(&self, id: &str) -> Result<SessionBundle> {
        match self.store.get(&self.payload_key(id))? {
            None => Err(TutorError::session_not_found(id)),
            Some(text) => {
                let bundle: SessionBundle = serde_json::from_str(&text)?;
                Ok(bundle)
            }
        }
    }

    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let indexed = entries.len() != before;
        let payload_exists = self.store.get(&self.payload_key(id))?.is_some();

        if !indexed && !payload_exists {
            return Err(TutorError::session_not_found(id));
        }

        // Index reference goes first so no reader observes a dangling id.
        self.write_index(&entries)?;
        self.store.remove(&self.payload_key(id))?;
        Ok(())
    }

    /// Entries partitioned by group: named groups alphabetically, the
    /// reserved Ungrouped bucket always last.
    pub fn group_index(&self) -> Result<Vec<(String, Vec<LibraryIndexEntry>)>> {
        let mut grouped: BTreeMap<String, Vec<LibraryIndexEntry>> = BTreeMap::new();
        let mut ungrouped: Vec<LibraryIndexEntry> = Vec::new();

        for entry in self.entries()? {
            match entry.group.clone() {
                Some(group) => grouped.entry(group).or_default().push(entry),
                None => ungrouped.push(entry),
            }
        }

        // A group literally named like the reserved bucket joins it.
        if let Some(mut clashing) = grouped.remove(UNGROUPED_LABEL) {
            clashing.append(&mut ungrouped);
            ungrouped = clashing;
        }

        let mut groups: Vec<(String, Vec<LibraryIndexEntry>)> = grouped.into_iter().collect();
        if !ungrouped.is_empty() {
            groups.push((UNGROUPED_LABEL.to_string(), ungrouped));
        }
        Ok(groups)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::state::{SessionBundle, Theme, WhiteboardRecord};
    use crate::storage::MemoryStore;

    fn sample_bundle() -> SessionBundle {
        let mut bundle = SessionBundle::new(Theme::Light, "tutor-small".to_string());
        bundle.whiteboards.push(WhiteboardRecord::new(
            "Fractions".to_string(),
            "<svg/>".to_string(),
            "Parts of a whole.".to_string(),
        ));
        bundle
    }

    #[test]
    fn test_save_then_load_is_structurally_equal() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        let bundle = sample_bundle();

        let entry = library.save(&bundle, "Fractions", None).unwrap();
        assert_eq!(entry.topic_count, 1);
        assert!(entry.timestamp > 0);

        let loaded = library.load(&entry.id).unwrap();
        assert_eq!(loaded, bundle);
    }

    #[test]
    fn test_load_unknown_id_fails() {
        let library = SessionLibrary::with_defaults(MemoryStore::new());
        assert!(matches!(
            library.load("nope"),
            Err(TutorError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_load_with_dangling_index_entry_fails() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        let entry = library.save(&sample_bundle(), "Tampered", None).unwrap();

        // Simulate external tampering: payload gone, index entry left behind.
        let payload_key = library.payload_key(&entry.id);
        library.store.remove(&payload_key).unwrap();

        assert_eq!(library.entries().unwrap().len(), 1);
        assert!(matches!(
            library.load(&entry.id),
            Err(TutorError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_delete_removes_index_and_payload_together() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        let entry = library.save(&sample_bundle(), "Doomed", Some("Math")).unwrap();

        library.delete(&entry.id).unwrap();

        assert!(matches!(
            library.load(&entry.id),
            Err(TutorError::SessionNotFound { .. })
        ));
        let flattened: Vec<String> = library
            .group_index()
            .unwrap()
            .into_iter()
            .flat_map(|(_, entries)| entries)
            .map(|e| e.id)
            .collect();
        assert!(!flattened.contains(&entry.id));
    }

    #[test]
    fn test_delete_unknown_id_fails() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        assert!(matches!(
            library.delete("ghost"),
            Err(TutorError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_group_index_ordering() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        library
            .save(&SessionBundle::default(), "One", Some("Zeta"))
            .unwrap();
        library
            .save(&SessionBundle::default(), "Two", Some("Alpha"))
            .unwrap();
        library.save(&SessionBundle::default(), "Three", None).unwrap();

        let groups = library.group_index().unwrap();
        let labels: Vec<&str> = groups.iter().map(|(label, _)| label.as_str()).collect();
        assert_eq!(labels, vec!["Alpha", "Zeta", "Ungrouped"]);
    }

    #[test]
    fn test_group_index_empty_library() {
        let library = SessionLibrary::with_defaults(MemoryStore::new());
        assert!(library.group_index().unwrap().is_empty());
    }

    #[test]
    fn test_storage_full_on_payload_leaves_no_index_entry() {
        let store = MemoryStore::with_quota(8);
        let mut library = SessionLibrary::with_defaults(store);

        let result = library.save(&sample_bundle(), "Too Big", None);
        assert!(matches!(result, Err(TutorError::StorageFull { .. })));
        assert!(library.entries().unwrap().is_empty());
    }

    #[test]
    fn test_index_write_failure_rolls_back_payload() {
        // Fails exactly the index-key write, after the payload went in.
        struct IndexRejectingStore {
            inner: MemoryStore,
        }

        impl KeyValueStore for IndexRejectingStore {
            fn get(&self, key: &str) -> Result<Option<String>> {
                self.inner.get(key)
            }
            fn set(&mut self, key: &str, value: &str) -> Result<()> {
                if key == DEFAULT_INDEX_KEY {
                    return Err(TutorError::storage_full("index write rejected"));
                }
                self.inner.set(key, value)
            }
            fn remove(&mut self, key: &str) -> Result<()> {
                self.inner.remove(key)
            }
        }

        let store = IndexRejectingStore {
            inner: MemoryStore::new(),
        };
        let mut library = SessionLibrary::with_defaults(store);

        let result = library.save(&sample_bundle(), "Rollback", None);
        assert!(matches!(result, Err(TutorError::StorageFull { .. })));

        // Neither key survived the failed save.
        assert!(library.store().inner.is_empty());
    }

    #[test]
    fn test_invalid_name_rejected_before_any_write() {
        let mut library = SessionLibrary::with_defaults(MemoryStore::new());
        assert!(library.save(&SessionBundle::default(), "", None).is_err());
        assert!(library.store().is_empty());
    }
}
