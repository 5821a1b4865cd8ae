use crate::application::rank::{rank, Ranking};
use crate::application::select::{RecommendationSelector, Selection};
use crate::domain::entities::interaction::Interaction;
use crate::domain::entities::recommendation::{RecommendationResponse, Retrieval};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::interaction_recorder::InteractionRecorder;
use crate::domain::ports::symptom_extractor::SymptomExtractor;
use crate::domain::ports::vector_index::VectorIndex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs one query through extraction, embedding, retrieval, ranking and selection.
pub struct RecommendUseCase {
    extractor: Arc<dyn SymptomExtractor>,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
    selector: RecommendationSelector,
    recorder: Arc<dyn InteractionRecorder>,
    top_k: usize,
    raw_query_fallback: bool,
}

impl RecommendUseCase {
    pub fn new(
        extractor: Arc<dyn SymptomExtractor>,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
        selector: RecommendationSelector,
        recorder: Arc<dyn InteractionRecorder>,
        top_k: usize,
        raw_query_fallback: bool,
    ) -> Self {
        Self {
            extractor,
            embedder,
            index,
            selector,
            recorder,
            top_k,
            raw_query_fallback,
        }
    }

    pub async fn execute(&self, query: &str) -> Result<RecommendationResponse, DomainError> {
        let query = query.trim();
        if query.is_empty() {
            debug!("blank query, nothing to extract");
            return Ok(RecommendationResponse::empty());
        }

        let Some(symptoms) = self.extract(query).await else {
            debug!(extractor = self.extractor.name(), "no symptoms extracted");
            return Ok(RecommendationResponse::empty());
        };
        debug!(?symptoms, "extracted");

        let joined = symptoms.join(", ");
        let vectors = self.embedder.embed(&[joined], InputType::Query).await?;
        let vector = vectors
            .into_iter()
            .next()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| DomainError::Embedding("encoder returned no query vector".into()))?;
        debug!(dimension = vector.len(), "embedded");

        let hits = self.index.query(&vector, self.top_k)?;
        debug!(hits = hits.len(), "retrieved");

        let ranking = rank(hits);
        if ranking.is_empty() {
            debug!("index returned no matches");
            return Ok(RecommendationResponse::empty());
        }
        info!(
            matches = ranking.matches.len(),
            average_distance = ranking.average_distance.unwrap_or_default(),
            "ranked"
        );

        let selection = self.selector.select(query, &symptoms, &ranking.matches).await;
        self.record(query, &symptoms, &ranking, &selection);

        let retrieval = Retrieval {
            extracted_symptoms: symptoms,
            matches: ranking.matches,
            recommendation: selection.text().to_string(),
        };
        Ok(match selection {
            Selection::Generated(_) => RecommendationResponse::Generated(retrieval),
            Selection::Fallback(_) | Selection::NoMatches(_) => RecommendationResponse::MatchesOnly(retrieval),
        })
    }

    async fn extract(&self, query: &str) -> Option<Vec<String>> {
        let symptoms = self.extractor.extract(query).await;
        if !symptoms.is_empty() {
            return Some(symptoms);
        }
        if self.raw_query_fallback {
            debug!("extraction empty, using raw query as the symptom");
            return Some(vec![query.to_string()]);
        }
        None
    }

    fn record(&self, query: &str, symptoms: &[String], ranking: &Ranking, selection: &Selection) {
        let system_response = serde_json::to_string(&ranking.matches).unwrap_or_default();
        let model_response = match selection {
            Selection::Generated(text) => text.clone(),
            _ => String::new(),
        };
        let interaction = Interaction::new(
            query.to_string(),
            symptoms.join(", "),
            system_response,
            ranking.average_distance,
            model_response,
        );
        if let Err(e) = self.recorder.record(&interaction) {
            warn!(error = %e, "failed to record interaction");
        }
    }
}
