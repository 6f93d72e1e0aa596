use tempfile::TempDir;
use tutor::core::session::{
    import_package, package_collection, package_session, ChatEntry, ChatRole, NamedSessionBundle,
    Package, PlaygroundArtifact, PlaygroundKind, SessionBundle, SessionLibrary, Theme,
    WhiteboardRecord,
};
use tutor::storage::FileStore;
use tutor::TutorError;

fn study_bundle(topic: &str) -> SessionBundle {
    let mut bundle = SessionBundle::new(Theme::Dark, "tutor-large".to_string());
    bundle.whiteboards.push(WhiteboardRecord::new(
        topic.to_string(),
        format!("<svg>{}</svg>", topic),
        format!("All about {}.", topic),
    ));
    bundle.chat_history.push(ChatEntry::new(
        ChatRole::User,
        format!("Teach me {}", topic),
    ));
    bundle.chat_history.push(ChatEntry::new(
        ChatRole::Assistant,
        format!("Gladly. {} works like this.", topic),
    ));
    bundle.playgrounds.push(PlaygroundArtifact::new(
        "<html><body>drill</body></html>".to_string(),
        format!("{} drill", topic),
        PlaygroundKind::Practice,
    ));
    bundle
}

#[test]
fn single_session_roundtrips_through_a_file_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let archive_path = temp_dir.path().join("relativity.zip");

    let original = study_bundle("Relativity");
    let package = package_session(&original).unwrap();
    package.write_to(&archive_path).unwrap();

    let reloaded = Package::read_from(&archive_path).unwrap();
    let imported = import_package(&reloaded, "relativity").unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].name, "relativity");
    assert_eq!(imported[0].group, None);
    assert_eq!(imported[0].bundle, original);
}

#[test]
fn grouped_collection_survives_export_import_and_library_storage() {
    let temp_dir = TempDir::new().unwrap();

    let sessions = vec![
        NamedSessionBundle {
            name: "Calculus".to_string(),
            group: Some("Math".to_string()),
            bundle: study_bundle("Calculus"),
        },
        NamedSessionBundle {
            name: "Optics".to_string(),
            group: Some("Physics".to_string()),
            bundle: study_bundle("Optics"),
        },
        NamedSessionBundle {
            name: "Scratchpad".to_string(),
            group: None,
            bundle: SessionBundle::default(),
        },
    ];

    let archive_path = temp_dir.path().join("backup.zip");
    package_collection(&sessions).unwrap().write_to(&archive_path).unwrap();

    let imported =
        import_package(&Package::read_from(&archive_path).unwrap(), "backup").unwrap();
    assert_eq!(imported.len(), 3);

    let store = FileStore::new(temp_dir.path().join("library"));
    let mut library = SessionLibrary::with_defaults(store);

    for session in &imported {
        library
            .save(&session.bundle, &session.name, session.group.as_deref())
            .unwrap();
    }

    let groups = library.group_index().unwrap();
    let labels: Vec<&str> = groups.iter().map(|(label, _)| label.as_str()).collect();
    assert_eq!(labels, vec!["math", "physics", "Ungrouped"]);

    // Content survives the full trip: export, file, import, library save, load.
    let calculus = groups
        .iter()
        .find(|(label, _)| label == "math")
        .map(|(_, entries)| &entries[0])
        .unwrap();
    let loaded = library.load(&calculus.id).unwrap();
    assert_eq!(loaded, sessions[0].bundle);
}

#[test]
fn deleting_from_a_file_backed_library_removes_payload_and_index() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("library"));
    let mut library = SessionLibrary::with_defaults(store);

    let entry = library
        .save(&study_bundle("Genetics"), "Genetics", None)
        .unwrap();
    assert!(library.load(&entry.id).is_ok());

    library.delete(&entry.id).unwrap();

    assert!(matches!(
        library.load(&entry.id),
        Err(TutorError::SessionNotFound { .. })
    ));
    assert!(library.group_index().unwrap().is_empty());
}

#[test]
fn library_state_persists_across_reopen() {
    let temp_dir = TempDir::new().unwrap();
    let library_dir = temp_dir.path().join("library");

    let saved_id = {
        let mut library = SessionLibrary::with_defaults(FileStore::new(&library_dir));
        library
            .save(&study_bundle("Topology"), "Topology", Some("Math"))
            .unwrap()
            .id
    };

    let library = SessionLibrary::with_defaults(FileStore::new(&library_dir));
    let loaded = library.load(&saved_id).unwrap();
    assert_eq!(loaded.whiteboards[0].topic, "Topology");

    let entries = library.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].group.as_deref(), Some("Math"));
}
