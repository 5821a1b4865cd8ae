use crate::domain::entities::recommendation::{Match, NO_SYMPTOMS_MESSAGE};
use crate::domain::error::DomainError;
use crate::domain::ports::text_generator::TextGenerator;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const SYSTEM_PROMPT: &str = "You are an expert Ayurveda medical assistant.";

/// Result of turning ranked matches into a final recommendation.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// No matches to work with; generation was skipped.
    NoMatches(String),
    /// Text produced by the generator.
    Generated(String),
    /// Generation was unavailable; text templated from the top match.
    Fallback(String),
}

impl Selection {
    pub fn text(&self) -> &str {
        match self {
            Selection::NoMatches(t) | Selection::Generated(t) | Selection::Fallback(t) => t,
        }
    }
}

pub struct RecommendationSelector {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl RecommendationSelector {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self { generator, timeout }
    }

    pub async fn select(&self, query_text: &str, extracted_symptoms: &[String], matches: &[Match]) -> Selection {
        let Some(top) = matches.first() else {
            return Selection::NoMatches(NO_SYMPTOMS_MESSAGE.to_string());
        };

        let prompt = build_prompt(query_text, extracted_symptoms, matches);
        match self.generate(&prompt).await {
            Ok(text) => {
                debug!(generator = self.generator.name(), "recommendation generated");
                Selection::Generated(text)
            }
            Err(e) => {
                warn!(generator = self.generator.name(), error = %e, "falling back to templated recommendation");
                Selection::Fallback(fallback_text(top))
            }
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let text = tokio::time::timeout(self.timeout, self.generator.generate(SYSTEM_PROMPT, prompt))
            .await
            .map_err(|_| {
                DomainError::GenerationUnavailable(format!("timed out after {}s", self.timeout.as_secs_f64()))
            })??;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::GenerationUnavailable("empty completion".into()));
        }
        Ok(text.to_string())
    }
}

pub fn build_context(matches: &[Match]) -> String {
    matches
        .iter()
        .enumerate()
        .map(|(i, m)| {
            format!(
                "Match {} (Similarity: {:.2}):\nSymptoms: {}\nDisease: {}\nDosha: {}\nRemedy: {}",
                i + 1,
                m.similarity,
                m.symptoms,
                m.disease,
                m.dosha,
                m.remedy
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_prompt(query_text: &str, extracted_symptoms: &[String], matches: &[Match]) -> String {
    format!(
        "The patient reports: {query_text}\n\
         Recognized symptoms: {symptoms}\n\n\
         The top {count} matches from the remedy database are:\n\n\
         {context}\n\n\
         Choose the most relevant match and explain it to the patient clearly. \
         Include the disease name, the dosha involved and the remedies in natural language.",
        symptoms = extracted_symptoms.join(", "),
        count = matches.len(),
        context = build_context(matches),
    )
}

pub fn fallback_text(top: &Match) -> String {
    format!(
        "The closest match for your symptoms is {} ({} dosha, similarity {:.2}). Suggested remedy: {}",
        top.disease, top.dosha, top.similarity, top.remedy
    )
}
