use serde::{Deserialize, Serialize};

/// Metadata stored alongside every indexed symptom sentence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub disease: String,
    pub dosha: String,
    pub remedy: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    pub id: String,
    pub embedding: Vec<f32>,
    pub document: String,
    pub metadata: EntryMetadata,
}

impl IndexedEntry {
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

/// One nearest-neighbor result, as reported by the index.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexHit {
    pub id: String,
    pub document: String,
    pub distance: f64,
    pub metadata: EntryMetadata,
}
