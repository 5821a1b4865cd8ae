use remedy_finder::domain::entities::indexed_entry::{EntryMetadata, IndexedEntry};
use remedy_finder::domain::error::DomainError;
use remedy_finder::domain::ports::vector_index::VectorIndex;
use remedy_finder::infrastructure::sqlite::migrations::run_migrations;
use remedy_finder::infrastructure::sqlite::vector_index::SqliteVectorIndex;
use rusqlite::Connection;

fn setup() -> SqliteVectorIndex {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteVectorIndex::new(conn)
}

fn entry(id: &str, embedding: Vec<f32>, disease: &str) -> IndexedEntry {
    IndexedEntry {
        id: id.to_string(),
        embedding,
        document: format!("{disease} symptom"),
        metadata: EntryMetadata {
            disease: disease.to_string(),
            dosha: "Pitta".to_string(),
            remedy: format!("{disease} remedy"),
        },
    }
}

fn seeded() -> SqliteVectorIndex {
    let index = setup();
    index
        .upsert_many(&[
            entry("0-0", vec![1.0, 0.0, 0.0], "Acne"),
            entry("1-0", vec![0.0, 1.0, 0.0], "Insomnia"),
            entry("2-0", vec![0.7, 0.7, 0.0], "Eczema"),
        ])
        .unwrap();
    index
}

#[test]
fn test_empty_index_query_returns_nothing() {
    let index = setup();
    assert_eq!(index.count().unwrap(), 0);
    assert_eq!(index.stored_dimension().unwrap(), None);
    assert!(index.query(&[1.0, 0.0], 3).unwrap().is_empty());
}

#[test]
fn test_query_orders_by_distance() {
    let index = seeded();

    let hits = index.query(&[1.0, 0.1, 0.0], 3).unwrap();

    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["0-0", "2-0", "1-0"]);
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.distance)));
    assert_eq!(hits[0].metadata.remedy, "Acne remedy");
    assert_eq!(hits[0].document, "Acne symptom");
}

#[test]
fn test_identical_vector_has_zero_distance() {
    let index = seeded();
    let hits = index.query(&[0.0, 2.0, 0.0], 1).unwrap();
    assert_eq!(hits[0].id, "1-0");
    assert!(hits[0].distance.abs() < 1e-6);
}

#[test]
fn test_k_larger_than_index() {
    let index = seeded();
    assert_eq!(index.query(&[1.0, 0.0, 0.0], 10).unwrap().len(), 3);
    assert_eq!(index.query(&[1.0, 0.0, 0.0], 2).unwrap().len(), 2);
}

#[test]
fn test_zero_k_returns_nothing() {
    let index = seeded();
    assert!(index.query(&[1.0, 0.0, 0.0], 0).unwrap().is_empty());
}

#[test]
fn test_upsert_is_idempotent() {
    let index = seeded();
    index.upsert(&entry("0-0", vec![1.0, 0.0, 0.0], "Acne")).unwrap();
    index
        .upsert_many(&[
            entry("0-0", vec![1.0, 0.0, 0.0], "Acne"),
            entry("1-0", vec![0.0, 1.0, 0.0], "Insomnia"),
        ])
        .unwrap();
    assert_eq!(index.count().unwrap(), 3);
}

#[test]
fn test_upsert_overwrites_existing_entry() {
    let index = seeded();
    index.upsert(&entry("1-0", vec![0.0, 1.0, 0.0], "Sleeplessness")).unwrap();

    let hits = index.query(&[0.0, 1.0, 0.0], 1).unwrap();
    assert_eq!(index.count().unwrap(), 3);
    assert_eq!(hits[0].id, "1-0");
    assert_eq!(hits[0].metadata.disease, "Sleeplessness");
}

#[test]
fn test_ties_keep_insertion_order() {
    let index = setup();
    index
        .upsert_many(&[
            entry("b", vec![1.0, 0.0], "B"),
            entry("a", vec![1.0, 0.0], "A"),
            entry("c", vec![2.0, 0.0], "C"),
        ])
        .unwrap();
    // overwriting keeps the original position
    index.upsert(&entry("b", vec![1.0, 0.0], "B2")).unwrap();

    let hits = index.query(&[1.0, 0.0], 3).unwrap();
    let ids: Vec<&str> = hits.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn test_dimension_mismatch_rejected() {
    let index = seeded();
    assert_eq!(index.stored_dimension().unwrap(), Some(3));

    let err = index.upsert(&entry("9-0", vec![1.0, 0.0], "Short")).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));

    let err = index.query(&[1.0, 0.0], 3).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(index.count().unwrap(), 3);
}

#[test]
fn test_mixed_batch_rejected_atomically() {
    let index = setup();
    let err = index
        .upsert_many(&[entry("0-0", vec![1.0, 0.0], "A"), entry("1-0", vec![1.0, 0.0, 0.0], "B")])
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(index.count().unwrap(), 0);
}

#[test]
fn test_empty_embedding_rejected() {
    let index = setup();
    assert!(matches!(
        index.upsert(&entry("0-0", vec![], "A")),
        Err(DomainError::InvalidInput(_))
    ));
}

#[test]
fn test_entries_persist_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.db");
    {
        let conn = Connection::open(&path).unwrap();
        run_migrations(&conn).unwrap();
        let index = SqliteVectorIndex::new(conn);
        index.upsert(&entry("0-0", vec![0.5, 0.5], "Acne")).unwrap();
    }

    let conn = Connection::open(&path).unwrap();
    run_migrations(&conn).unwrap();
    let index = SqliteVectorIndex::new(conn);
    assert_eq!(index.count().unwrap(), 1);
    let hits = index.query(&[1.0, 1.0], 1).unwrap();
    assert_eq!(hits[0].metadata.disease, "Acne");
}

#[test]
fn test_non_finite_vectors_rejected() {
    let index = setup();
    let mut entries = Vec::new();
    for i in 0..40 {
        let x = i as f32 / 40.0;
        let embedding = if i % 3 == 0 { vec![f32::NAN, x] } else { vec![1.0, x] };
        entries.push(entry(&format!("e{i}"), embedding, "Any"));
    }
    let err = index.upsert_many(&entries).unwrap_err();
    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert_eq!(index.count().unwrap(), 0);

    assert!(matches!(
        index.upsert(&entry("inf", vec![f32::INFINITY, 1.0], "Inf")),
        Err(DomainError::InvalidInput(_))
    ));

    let finite: Vec<IndexedEntry> = entries.into_iter().filter(|e| e.embedding[0].is_finite()).collect();
    index.upsert_many(&finite).unwrap();
    assert!(matches!(index.query(&[f32::NAN, 0.5], 5), Err(DomainError::InvalidInput(_))));

    let hits = index.query(&[1.0, 0.5], 5).unwrap();
    assert_eq!(hits.len(), 5);
    assert!(hits.iter().all(|h| (0.0..=1.0).contains(&h.distance)));
    assert!(hits.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert_eq!(hits[0].id, "e20");
}
