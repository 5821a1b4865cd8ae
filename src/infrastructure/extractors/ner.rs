use crate::domain::error::DomainError;
use crate::domain::ports::symptom_extractor::{normalize_phrases, SymptomExtractor};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

pub const SYMPTOM_LABEL: &str = "SYMPTOM";

/// Sequence-labeling model served over HTTP.
///
/// The service receives `{"text": ...}` and answers
/// `{"entities": [{"text": ..., "label": ...}]}`. Only entities carrying the
/// symptom label are kept.
pub struct NerExtractor {
    client: Client,
    url: String,
}

#[derive(Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<NerEntity>,
}

#[derive(Deserialize)]
struct NerEntity {
    text: String,
    label: String,
}

impl NerExtractor {
    pub fn new(url: impl Into<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {e}")))?;
        Ok(Self { client, url: url.into() })
    }

    async fn request(&self, text: &str) -> Result<Vec<String>, String> {
        let resp = self
            .client
            .post(&self.url)
            .json(&NerRequest { text })
            .send()
            .await
            .map_err(|e| format!("NER request failed: {e}"))?;
        if !resp.status().is_success() {
            return Err(format!("NER service returned {}", resp.status()));
        }
        let parsed: NerResponse = resp.json().await.map_err(|e| format!("NER parse error: {e}"))?;
        Ok(parsed
            .entities
            .into_iter()
            .filter(|e| e.label.eq_ignore_ascii_case(SYMPTOM_LABEL))
            .map(|e| e.text)
            .collect())
    }
}

#[async_trait]
impl SymptomExtractor for NerExtractor {
    fn name(&self) -> &str {
        "ner"
    }

    async fn extract(&self, text: &str) -> Vec<String> {
        match self.request(text).await {
            Ok(phrases) => normalize_phrases(phrases),
            Err(e) => {
                warn!(url = %self.url, error = %e, "symptom model unavailable");
                vec![]
            }
        }
    }
}
