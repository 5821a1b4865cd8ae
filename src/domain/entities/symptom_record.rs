use crate::domain::entities::indexed_entry::{EntryMetadata, IndexedEntry};
use crate::domain::values::dosha::DoshaSet;

/// A single symptom sentence of a dataset entry, paired with its remedy.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomRecord {
    pub entry_index: usize,
    pub sentence_index: usize,
    pub disease: String,
    pub dosha: DoshaSet,
    pub symptom_text: String,
    pub remedy_text: String,
}

impl SymptomRecord {
    pub fn id(&self) -> String {
        format!("{}-{}", self.entry_index, self.sentence_index)
    }

    pub fn metadata(&self) -> EntryMetadata {
        EntryMetadata {
            disease: self.disease.clone(),
            dosha: self.dosha.to_string(),
            remedy: self.remedy_text.clone(),
        }
    }

    pub fn into_entry(self, embedding: Vec<f32>) -> IndexedEntry {
        IndexedEntry {
            id: self.id(),
            metadata: self.metadata(),
            document: self.symptom_text,
            embedding,
        }
    }
}
