use crate::domain::entities::indexed_entry::{IndexHit, IndexedEntry};
use crate::domain::error::DomainError;

/// Persistent nearest-neighbor store of symptom sentences.
///
/// All entries of one index share a single embedding dimensionality.
/// `query` returns at most `k` hits ordered by ascending distance.
pub trait VectorIndex: Send + Sync {
    fn upsert(&self, entry: &IndexedEntry) -> Result<(), DomainError>;

    fn upsert_many(&self, entries: &[IndexedEntry]) -> Result<(), DomainError> {
        for entry in entries {
            self.upsert(entry)?;
        }
        Ok(())
    }

    fn query(&self, embedding: &[f32], k: usize) -> Result<Vec<IndexHit>, DomainError>;
    fn count(&self) -> Result<usize, DomainError>;
    fn stored_dimension(&self) -> Result<Option<usize>, DomainError>;
}
