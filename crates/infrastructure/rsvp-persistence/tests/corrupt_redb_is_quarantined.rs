use camino::Utf8PathBuf;
use rsvp_persistence::{DbState, NewHost, RedbRsvpStore, RsvpDataStore, RSVP_REDB_FILENAME};

#[test]
fn corrupt_redb_is_quarantined_and_next_write_recreates() {
    let dir = tempfile::tempdir().unwrap();
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    let db_path = root.join(RSVP_REDB_FILENAME);

    std::fs::write(&db_path, b"definitely-not-a-redb-database").unwrap();

    let store = RedbRsvpStore::new(root.clone());
    assert_eq!(store.validate().unwrap(), DbState::Corrupt);
    assert!(!db_path.exists());

    let quarantines: Vec<_> = std::fs::read_dir(&root)
        .unwrap()
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|n| n.starts_with("rsvp.redb.corrupt."))
        .collect();
    assert_eq!(quarantines.len(), 1, "expected exactly one quarantine");

    store
        .insert_host(&NewHost {
            slug: "mary&john".into(),
            couple_name: "Mary & John".into(),
            theme_id: None,
            event_date: None,
            location: None,
        })
        .unwrap();
    assert!(db_path.exists());
    assert!(store.find_host_by_slug("mary&john").unwrap().is_some());
}
