use shelfkeep_core::{Book, CatalogError, CatalogStore, LoadOutcome};

fn read_document(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn open_missing_file_creates_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("catalog.json");

    let store = CatalogStore::open(&path).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.load_outcome(), &LoadOutcome::Created);
    assert_eq!(store.path(), path.as_path());
    assert_eq!(read_document(&path), serde_json::json!([]));
}

#[test]
fn open_plain_text_file_resets_to_empty_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, "this is not json").unwrap();

    let store = CatalogStore::open(&path).unwrap();

    assert!(store.is_empty());
    match store.load_outcome() {
        LoadOutcome::Recovered { reason } => {
            assert!(reason.contains("invalid catalog document"), "reason: {reason}")
        }
        other => panic!("expected recovery, got {other:?}"),
    }
    assert_eq!(read_document(&path), serde_json::json!([]));
}

#[test]
fn open_document_with_bad_record_resets_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"title": "Dune", "author": "Herbert", "isbn": "111", "available": true},
            {"title": "Broken"}]"#,
    )
    .unwrap();

    let store = CatalogStore::open(&path).unwrap();

    assert!(store.is_empty());
    assert!(matches!(store.load_outcome(), LoadOutcome::Recovered { .. }));
}

#[test]
fn every_mutation_is_written_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut store = CatalogStore::open(&path).unwrap();

    store.add_book(Book::new("Dune", "Herbert", "111")).unwrap();
    assert_eq!(
        read_document(&path),
        serde_json::json!([
            {"title": "Dune", "author": "Herbert", "isbn": "111", "available": true}
        ])
    );

    store.issue_book("111").unwrap();
    assert_eq!(read_document(&path)[0]["available"], false);

    store.return_book("111").unwrap();
    assert_eq!(read_document(&path)[0]["available"], true);
}

#[test]
fn reopen_restores_books_and_availability() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    {
        let mut store = CatalogStore::open(&path).unwrap();
        store
            .add_book(Book::new("Harry Potter", "Rowling", "100"))
            .unwrap();
        store.add_book(Book::new("Dune", "Herbert", "111")).unwrap();
        store.issue_book("111").unwrap();
    }

    let reopened = CatalogStore::open(&path).unwrap();

    assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.list_all()[0].title, "Harry Potter");
    assert!(reopened.list_all()[0].is_available());
    assert!(!reopened.search_by_isbn("111").unwrap().is_available());
}

#[test]
fn loads_document_written_by_another_tool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[
    {
        "title": "Emma",
        "author": "Austen",
        "isbn": "222",
        "available": false
    }
]"#,
    )
    .unwrap();

    let store = CatalogStore::open(&path).unwrap();

    assert_eq!(store.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(store.list_all()[0].title, "Emma");
    assert!(!store.list_all()[0].is_available());
}

#[test]
fn save_failure_is_returned_to_caller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut store = CatalogStore::open(&path).unwrap();

    // Replace the backing file with a directory so the next write fails.
    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let err = store
        .add_book(Book::new("Dune", "Herbert", "111"))
        .unwrap_err();
    assert!(err.to_string().contains("catalog file"), "unexpected error: {err}");
}

#[test]
fn failed_writes_roll_back_in_memory_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    let mut store = CatalogStore::open(&path).unwrap();
    store.add_book(Book::new("Dune", "Herbert", "111")).unwrap();
    store.add_book(Book::new("Emma", "Austen", "222")).unwrap();
    store.issue_book("222").unwrap();
    let on_disk = std::fs::read_to_string(&path).unwrap();

    std::fs::remove_file(&path).unwrap();
    std::fs::create_dir(&path).unwrap();

    let err = store.issue_book("111").unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert!(store.search_by_isbn("111").unwrap().is_available());

    let err = store.return_book("222").unwrap_err();
    assert!(matches!(err, CatalogError::Store(_)));
    assert!(!store.search_by_isbn("222").unwrap().is_available());

    store
        .add_book(Book::new("The Hobbit", "Tolkien", "333"))
        .unwrap_err();
    assert_eq!(store.len(), 2);

    // Once the document is writable again the same requests go through.
    std::fs::remove_dir(&path).unwrap();
    std::fs::write(&path, on_disk).unwrap();
    store.issue_book("111").unwrap();
    store.return_book("222").unwrap();

    let reopened = CatalogStore::open(&path).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(!reopened.search_by_isbn("111").unwrap().is_available());
    assert!(reopened.search_by_isbn("222").unwrap().is_available());
}
