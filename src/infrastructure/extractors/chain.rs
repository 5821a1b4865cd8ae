use crate::domain::ports::symptom_extractor::SymptomExtractor;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// Runs the primary extractor and falls back to the secondary one when the
/// primary finds nothing.
pub struct ChainExtractor {
    primary: Arc<dyn SymptomExtractor>,
    fallback: Arc<dyn SymptomExtractor>,
}

impl ChainExtractor {
    pub fn new(primary: Arc<dyn SymptomExtractor>, fallback: Arc<dyn SymptomExtractor>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl SymptomExtractor for ChainExtractor {
    fn name(&self) -> &str {
        "chain"
    }

    async fn extract(&self, text: &str) -> Vec<String> {
        let phrases = self.primary.extract(text).await;
        if !phrases.is_empty() {
            return phrases;
        }
        debug!(
            primary = self.primary.name(),
            fallback = self.fallback.name(),
            "primary extractor found nothing"
        );
        self.fallback.extract(text).await
    }
}
