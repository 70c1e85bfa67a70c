use camino::Utf8PathBuf;
use rsvp_persistence::{NewHost, RedbRsvpStore, RsvpDataStore, StorageErrorKind};

fn store_in(dir: &tempfile::TempDir) -> RedbRsvpStore {
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
    RedbRsvpStore::new(root)
}

fn new_host(slug: &str, couple_name: &str) -> NewHost {
    NewHost {
        slug: slug.into(),
        couple_name: couple_name.into(),
        theme_id: Some("charcoal".into()),
        event_date: None,
        location: None,
    }
}

#[test]
fn lookup_on_missing_database_is_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    assert!(store.find_host_by_slug("mary&john").unwrap().is_none());
    assert!(store.list_rsvps("any-host").unwrap().is_empty());
    assert!(!store.delete_rsvp("nope").unwrap());
}

#[test]
fn created_host_is_found_by_slug() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let created = store.insert_host(&new_host("mary&john", "Mary & John")).unwrap();
    let found = store.find_host_by_slug("mary&john").unwrap().unwrap();

    assert_eq!(found, created);
    assert_eq!(found.couple_name, "Mary & John");
    assert_eq!(found.theme_id.as_deref(), Some("charcoal"));
    assert!(store.find_host_by_slug("someone-else").unwrap().is_none());
}

#[test]
fn second_host_with_same_slug_is_a_conflict() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    store.insert_host(&new_host("jo-ann", "Jo Ann")).unwrap();
    let err = store.insert_host(&new_host("jo-ann", "Jo  Ann")).unwrap_err();
    assert_eq!(err.kind(), StorageErrorKind::Conflict);

    let kept = store.find_host_by_slug("jo-ann").unwrap().unwrap();
    assert_eq!(kept.couple_name, "Jo Ann");
}

#[test]
fn theme_and_cover_updates_persist() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.insert_host(&new_host("ana&ben", "Ana & Ben")).unwrap();

    store.set_host_theme("ana&ben", "sage").unwrap();
    store
        .set_cover_image("ana&ben", Some("https://img.example/cover.jpg"))
        .unwrap();

    let host = store.find_host_by_slug("ana&ben").unwrap().unwrap();
    assert_eq!(host.theme_id.as_deref(), Some("sage"));
    assert_eq!(
        host.cover_image_url.as_deref(),
        Some("https://img.example/cover.jpg")
    );

    let cleared = store.set_cover_image("ana&ben", None).unwrap();
    assert!(cleared.cover_image_url.is_none());
}

#[test]
fn updating_unknown_host_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    let err = store.set_host_theme("ghost", "rose").unwrap_err();
    assert_eq!(err.kind(), StorageErrorKind::NotFound);
}
