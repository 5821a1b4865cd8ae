use crate::domain::entities::indexed_entry::{EntryMetadata, IndexHit, IndexedEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_index::VectorIndex;
use crate::domain::values::distance::half_cosine_distance;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Mutex, MutexGuard};

const UPSERT_SQL: &str = "INSERT INTO index_entries (id, embedding, dimension, document, disease, dosha, remedy)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
     ON CONFLICT(id) DO UPDATE SET
        embedding = excluded.embedding,
        dimension = excluded.dimension,
        document = excluded.document,
        disease = excluded.disease,
        dosha = excluded.dosha,
        remedy = excluded.remedy";

/// Brute-force cosine index stored in SQLite. Entries are scanned in
/// insertion order, so equal distances keep that order.
pub struct SqliteVectorIndex {
    conn: Mutex<Connection>,
}

impl SqliteVectorIndex {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::IndexUnavailable(e.to_string()))
    }

    fn serialize_vector(v: &[f32]) -> Vec<u8> {
        v.iter().flat_map(|f| f.to_le_bytes()).collect()
    }

    fn deserialize_vector(bytes: &[u8]) -> Vec<f32> {
        bytes
            .chunks_exact(4)
            .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect()
    }

    fn dimension_of(conn: &Connection) -> Result<Option<usize>, DomainError> {
        let dim: Option<i64> = conn
            .query_row("SELECT dimension FROM index_entries LIMIT 1", [], |r| r.get(0))
            .optional()
            .map_err(|e| DomainError::IndexUnavailable(format!("Failed to read dimension: {e}")))?;
        Ok(dim.map(|d| d as usize))
    }

    fn check_vector(expected: Option<usize>, vector: &[f32], what: &str) -> Result<(), DomainError> {
        let got = vector.len();
        if got == 0 {
            return Err(DomainError::InvalidInput(format!("{what} vector is empty")));
        }
        if vector.iter().any(|x| !x.is_finite()) {
            return Err(DomainError::InvalidInput(format!("{what} vector has non-finite values")));
        }
        match expected {
            Some(dim) if dim != got => Err(DomainError::InvalidInput(format!(
                "{what} vector has dimension {got}, index stores dimension {dim}"
            ))),
            _ => Ok(()),
        }
    }
}

impl VectorIndex for SqliteVectorIndex {
    fn upsert(&self, entry: &IndexedEntry) -> Result<(), DomainError> {
        self.upsert_many(std::slice::from_ref(entry))
    }

    fn upsert_many(&self, entries: &[IndexedEntry]) -> Result<(), DomainError> {
        let mut conn = self.lock()?;
        let mut expected = Self::dimension_of(&conn)?;
        for entry in entries {
            Self::check_vector(expected, &entry.embedding, "Entry")?;
            expected = Some(entry.dimension());
        }

        let tx = conn
            .transaction()
            .map_err(|e| DomainError::IndexUnavailable(format!("Failed to begin upsert: {e}")))?;
        for entry in entries {
            tx.execute(
                UPSERT_SQL,
                params![
                    entry.id,
                    Self::serialize_vector(&entry.embedding),
                    entry.dimension() as i64,
                    entry.document,
                    entry.metadata.disease,
                    entry.metadata.dosha,
                    entry.metadata.remedy,
                ],
            )
            .map_err(|e| DomainError::IndexUnavailable(format!("Failed to upsert {}: {e}", entry.id)))?;
        }
        tx.commit()
            .map_err(|e| DomainError::IndexUnavailable(format!("Failed to commit upsert: {e}")))
    }

    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexHit>, DomainError> {
        let conn = self.lock()?;
        let Some(dim) = Self::dimension_of(&conn)? else {
            return Ok(vec![]);
        };
        Self::check_vector(Some(dim), embedding, "Query")?;
        if k == 0 {
            return Ok(vec![]);
        }

        let mut stmt = conn
            .prepare("SELECT id, embedding, document, disease, dosha, remedy FROM index_entries ORDER BY rowid")
            .map_err(|e| DomainError::IndexUnavailable(e.to_string()))?;
        let mut hits: Vec<IndexHit> = stmt
            .query_map([], |row| {
                let blob: Vec<u8> = row.get(1)?;
                Ok(IndexHit {
                    id: row.get(0)?,
                    distance: half_cosine_distance(embedding, &Self::deserialize_vector(&blob)),
                    document: row.get(2)?,
                    metadata: EntryMetadata {
                        disease: row.get(3)?,
                        dosha: row.get(4)?,
                        remedy: row.get(5)?,
                    },
                })
            })
            .map_err(|e| DomainError::IndexUnavailable(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| DomainError::IndexUnavailable(format!("Failed to read entry: {e}")))?;

        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(k);
        Ok(hits)
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM index_entries", [], |r| r.get(0))
            .map_err(|e| DomainError::IndexUnavailable(e.to_string()))?;
        Ok(count as usize)
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        let conn = self.lock()?;
        Self::dimension_of(&conn)
    }
}
