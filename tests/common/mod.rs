//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use remedy_finder::domain::entities::indexed_entry::{EntryMetadata, IndexHit, IndexedEntry};
use remedy_finder::domain::entities::interaction::Interaction;
use remedy_finder::domain::error::DomainError;
use remedy_finder::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use remedy_finder::domain::ports::interaction_recorder::InteractionRecorder;
use remedy_finder::domain::ports::symptom_extractor::SymptomExtractor;
use remedy_finder::domain::ports::text_generator::TextGenerator;
use remedy_finder::domain::ports::vector_index::VectorIndex;
use remedy_finder::infrastructure::embeddings::hashing::HashingProvider;
use remedy_finder::infrastructure::extractors::keyword::KeywordExtractor;
use remedy_finder::infrastructure::sqlite::interaction_repo::SqliteInteractionRepo;
use remedy_finder::infrastructure::sqlite::migrations::run_migrations;
use remedy_finder::{PipelineOptions, Providers, RemedyFinder};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const DATASET: &str = r#"[
  {
    "disease": "Acne",
    "primary_dosha": ["Pitta"],
    "symptoms": ["Red pimples on the face. Inflamed skin that feels hot."],
    "remedies": ["Apply sandalwood and turmeric paste.", "Drink aloe vera juice."]
  },
  {
    "disease": "Insomnia",
    "primary_dosha": ["Vata"],
    "symptoms": ["Trouble falling asleep at night."],
    "remedies": [{"herbal": "Warm milk with nutmeg before bed."}]
  },
  {
    "disease": "Indigestion",
    "primary_dosha": ["Kapha", "Pitta"],
    "symptoms": ["Heavy stomach after meals. Bloating and nausea."],
    "remedies": ["Chew fresh ginger before meals."]
  }
]"#;

/// Embeds by counting axis words; records every text it was asked to embed.
pub struct AxisEmbedder {
    axes: Vec<String>,
    pub calls: Mutex<Vec<String>>,
}

impl AxisEmbedder {
    pub fn new(axes: &[&str]) -> Self {
        Self {
            axes: axes.iter().map(|a| a.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let lowered = text.to_lowercase();
        let mut v: Vec<f32> = self
            .axes
            .iter()
            .map(|a| if lowered.contains(a.as_str()) { 1.0 } else { 0.0 })
            .collect();
        // constant component keeps unrelated texts from being zero vectors
        v.push(0.1);
        v
    }
}

#[async_trait]
impl EmbeddingProvider for AxisEmbedder {
    async fn embed(&self, texts: &[String], _input_type: InputType) -> Result<Vec<Vec<f32>>, DomainError> {
        self.calls.lock().unwrap().extend(texts.iter().cloned());
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimension(&self) -> usize {
        self.axes.len() + 1
    }
}

pub enum GeneratorBehavior {
    Reply(String),
    Fail,
    Hang(Duration),
}

pub struct StubGenerator {
    behavior: GeneratorBehavior,
    pub prompts: Mutex<Vec<String>>,
}

impl StubGenerator {
    pub fn new(behavior: GeneratorBehavior) -> Self {
        Self {
            behavior,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    fn name(&self) -> &str {
        "stub"
    }

    async fn generate(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(user_prompt.to_string());
        match &self.behavior {
            GeneratorBehavior::Reply(text) => Ok(text.clone()),
            GeneratorBehavior::Fail => Err(DomainError::GenerationUnavailable("stub failure".into())),
            GeneratorBehavior::Hang(d) => {
                tokio::time::sleep(*d).await;
                Ok("too late".into())
            }
        }
    }
}

/// Extractor that never recognizes anything.
pub struct SilentExtractor;

#[async_trait]
impl SymptomExtractor for SilentExtractor {
    fn name(&self) -> &str {
        "silent"
    }

    async fn extract(&self, _text: &str) -> Vec<String> {
        vec![]
    }
}

/// Index that answers every query with the same hits, nearest first.
pub struct StaticIndex {
    hits: Vec<IndexHit>,
}

impl StaticIndex {
    pub fn new(hits: Vec<IndexHit>) -> Self {
        Self { hits }
    }
}

impl VectorIndex for StaticIndex {
    fn upsert(&self, _entry: &IndexedEntry) -> Result<(), DomainError> {
        Ok(())
    }

    fn query(&self, _embedding: &[f32], k: usize) -> Result<Vec<IndexHit>, DomainError> {
        Ok(self.hits.iter().take(k).cloned().collect())
    }

    fn count(&self) -> Result<usize, DomainError> {
        Ok(self.hits.len())
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        Ok(None)
    }
}

/// Index whose backing store is gone.
pub struct UnavailableIndex;

impl VectorIndex for UnavailableIndex {
    fn upsert(&self, _entry: &IndexedEntry) -> Result<(), DomainError> {
        Err(DomainError::IndexUnavailable("store offline".into()))
    }

    fn query(&self, _embedding: &[f32], _k: usize) -> Result<Vec<IndexHit>, DomainError> {
        Err(DomainError::IndexUnavailable("store offline".into()))
    }

    fn count(&self) -> Result<usize, DomainError> {
        Err(DomainError::IndexUnavailable("store offline".into()))
    }

    fn stored_dimension(&self) -> Result<Option<usize>, DomainError> {
        Err(DomainError::IndexUnavailable("store offline".into()))
    }
}

/// Interaction log whose database is gone.
pub struct UnavailableRecorder;

impl InteractionRecorder for UnavailableRecorder {
    fn record(&self, _interaction: &Interaction) -> Result<(), DomainError> {
        Err(DomainError::Database("log offline".into()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<Interaction>, DomainError> {
        Err(DomainError::Database("log offline".into()))
    }

    fn count(&self) -> Result<usize, DomainError> {
        Err(DomainError::Database("log offline".into()))
    }
}

pub fn hit(disease: &str, dosha: &str, distance: f64) -> IndexHit {
    IndexHit {
        id: disease.to_lowercase(),
        document: format!("{disease} symptoms"),
        distance,
        metadata: EntryMetadata {
            disease: disease.to_string(),
            dosha: dosha.to_string(),
            remedy: format!("{disease} remedy"),
        },
    }
}

pub fn skin_hits() -> Vec<IndexHit> {
    vec![
        hit("acne", "Pitta", 0.1),
        hit("eczema", "Pitta", 0.3),
        hit("psoriasis", "Kapha", 0.5),
    ]
}

pub fn memory_recorder() -> Arc<dyn InteractionRecorder> {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    Arc::new(SqliteInteractionRepo::new(conn))
}

pub fn fast_options() -> PipelineOptions {
    PipelineOptions {
        generation_timeout: Duration::from_millis(200),
        ..PipelineOptions::default()
    }
}

pub fn providers(embedder: Arc<dyn EmbeddingProvider>, generator: Arc<dyn TextGenerator>) -> Providers {
    Providers {
        extractor: Arc::new(KeywordExtractor::default()),
        embedder,
        generator,
    }
}

/// In-memory finder with the keyword extractor and the hashing encoder.
pub fn setup(generator: GeneratorBehavior) -> RemedyFinder {
    RemedyFinder::with_providers(
        ":memory:",
        providers(
            Arc::new(HashingProvider::new(128).unwrap()),
            Arc::new(StubGenerator::new(generator)),
        ),
        fast_options(),
    )
    .unwrap()
}

/// Finder over a fixed set of index hits.
pub fn setup_static(
    hits: Vec<IndexHit>,
    embedder: Arc<dyn EmbeddingProvider>,
    generator: Arc<dyn TextGenerator>,
) -> RemedyFinder {
    RemedyFinder::with_stores(
        providers(embedder, generator),
        Arc::new(StaticIndex::new(hits)),
        memory_recorder(),
        fast_options(),
    )
}
