use crate::domain::entities::interaction::Interaction;
use crate::domain::error::DomainError;
use crate::domain::ports::interaction_recorder::InteractionRecorder;
use crate::domain::ports::vector_index::VectorIndex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    pub indexed_entries: usize,
    pub dimension: Option<usize>,
    pub interactions: usize,
}

pub struct StatsUseCase {
    index: Arc<dyn VectorIndex>,
    recorder: Arc<dyn InteractionRecorder>,
}

impl StatsUseCase {
    pub fn new(index: Arc<dyn VectorIndex>, recorder: Arc<dyn InteractionRecorder>) -> Self {
        Self { index, recorder }
    }

    pub fn stats(&self) -> Result<IndexStats, DomainError> {
        Ok(IndexStats {
            indexed_entries: self.index.count()?,
            dimension: self.index.stored_dimension()?,
            interactions: self.recorder.count()?,
        })
    }

    pub fn indexed_entries(&self) -> Result<usize, DomainError> {
        self.index.count()
    }

    pub fn history(&self, limit: usize) -> Result<Vec<Interaction>, DomainError> {
        self.recorder.recent(limit)
    }
}
