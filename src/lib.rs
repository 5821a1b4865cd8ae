pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;

use crate::application::ingest::{IngestReport, IngestUseCase};
use crate::application::recommend::RecommendUseCase;
use crate::application::select::RecommendationSelector;
use crate::application::stats::{IndexStats, StatsUseCase};
use crate::config::{Config, EmbeddingProviderKind, ExtractorKind, GeneratorKind};
use crate::domain::entities::interaction::Interaction;
use crate::domain::entities::recommendation::RecommendationResponse;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::interaction_recorder::InteractionRecorder;
use crate::domain::ports::symptom_extractor::SymptomExtractor;
use crate::domain::ports::text_generator::TextGenerator;
use crate::domain::ports::vector_index::VectorIndex;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::noop::NoopProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::embeddings::voyage::VoyageProvider;
use crate::infrastructure::extractors::chain::ChainExtractor;
use crate::infrastructure::extractors::keyword::{KeywordExtractor, DEFAULT_VOCABULARY};
use crate::infrastructure::extractors::ner::NerExtractor;
use crate::infrastructure::generation::disabled::DisabledGenerator;
use crate::infrastructure::generation::openai_chat::OpenAiChatGenerator;
use crate::infrastructure::sqlite::interaction_repo::SqliteInteractionRepo;
use crate::infrastructure::sqlite::migrations::run_migrations;
use crate::infrastructure::sqlite::vector_index::SqliteVectorIndex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// External services the pipeline depends on.
#[derive(Clone)]
pub struct Providers {
    pub extractor: Arc<dyn SymptomExtractor>,
    pub embedder: Arc<dyn EmbeddingProvider>,
    pub generator: Arc<dyn TextGenerator>,
}

/// Tunables of the recommend pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub top_k: usize,
    pub raw_query_fallback: bool,
    pub generation_timeout: Duration,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            top_k: 3,
            raw_query_fallback: false,
            generation_timeout: Duration::from_secs(30),
        }
    }
}

pub struct RemedyFinder {
    recommend_uc: RecommendUseCase,
    ingest_uc: IngestUseCase,
    stats_uc: StatsUseCase,
    suggestions: Vec<String>,
}

impl RemedyFinder {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let embedder: Arc<dyn EmbeddingProvider> = match config.embedding_provider {
            EmbeddingProviderKind::Hashing => Arc::new(HashingProvider::new(config.embedding_dimension)?),
            EmbeddingProviderKind::OpenAi => Arc::new(OpenAiProvider::new(
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_base_url.clone(),
            )?),
            EmbeddingProviderKind::Voyage => Arc::new(VoyageProvider::new(
                config.embedding_api_key.clone(),
                config.embedding_model.clone(),
                config.embedding_base_url.clone(),
            )?),
            EmbeddingProviderKind::Noop => Arc::new(NoopProvider),
        };

        let ner = || -> Result<Arc<dyn SymptomExtractor>, DomainError> {
            let url = config
                .ner_url
                .clone()
                .ok_or_else(|| DomainError::Config("REMEDY_NER_URL is not set".into()))?;
            Ok(Arc::new(NerExtractor::new(url)?))
        };
        let extractor: Arc<dyn SymptomExtractor> = match config.extractor {
            ExtractorKind::Keyword => Arc::new(KeywordExtractor::default()),
            ExtractorKind::Ner => ner()?,
            ExtractorKind::Chain => Arc::new(ChainExtractor::new(ner()?, Arc::new(KeywordExtractor::default()))),
        };

        let generator: Arc<dyn TextGenerator> = match config.generator {
            GeneratorKind::OpenAi => Arc::new(OpenAiChatGenerator::new(
                config.generation_api_key.clone(),
                config.generation_model.clone(),
                config.generation_base_url.clone(),
                config.generation_timeout,
            )?),
            GeneratorKind::Disabled => Arc::new(DisabledGenerator),
        };

        info!(
            db = %config.db_path,
            extractor = extractor.name(),
            generator = generator.name(),
            "initializing remedy finder"
        );

        Self::with_providers(
            &config.db_path,
            Providers {
                extractor,
                embedder,
                generator,
            },
            PipelineOptions {
                top_k: config.top_k,
                raw_query_fallback: config.raw_query_fallback,
                generation_timeout: config.generation_timeout,
            },
        )
    }

    pub fn with_providers(
        db_path: &str,
        providers: Providers,
        options: PipelineOptions,
    ) -> Result<Self, DomainError> {
        let index_conn = open_connection(db_path)?;
        let log_conn = open_connection(db_path)?;
        let index: Arc<dyn VectorIndex> = Arc::new(SqliteVectorIndex::new(index_conn));
        let recorder: Arc<dyn InteractionRecorder> = Arc::new(SqliteInteractionRepo::new(log_conn));
        Ok(Self::with_stores(providers, index, recorder, options))
    }

    /// Wires the pipeline over caller-supplied stores.
    pub fn with_stores(
        providers: Providers,
        index: Arc<dyn VectorIndex>,
        recorder: Arc<dyn InteractionRecorder>,
        options: PipelineOptions,
    ) -> Self {
        let provider_dim = providers.embedder.dimension();
        if provider_dim > 0 {
            if let Ok(Some(stored_dim)) = index.stored_dimension() {
                if stored_dim != provider_dim {
                    warn!(
                        stored_dim,
                        provider_dim,
                        "indexed vectors do not match the embedding provider; re-run ingestion"
                    );
                }
            }
        }

        let selector = RecommendationSelector::new(providers.generator, options.generation_timeout);
        Self {
            recommend_uc: RecommendUseCase::new(
                providers.extractor,
                providers.embedder.clone(),
                index.clone(),
                selector,
                recorder.clone(),
                options.top_k,
                options.raw_query_fallback,
            ),
            ingest_uc: IngestUseCase::new(providers.embedder, index.clone()),
            stats_uc: StatsUseCase::new(index, recorder),
            suggestions: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub async fn recommend(&self, query: &str) -> Result<RecommendationResponse, DomainError> {
        self.recommend_uc.execute(query).await
    }

    pub async fn ingest_file(&self, path: &Path) -> Result<IngestReport, DomainError> {
        self.ingest_uc.execute_file(path).await
    }

    pub async fn ingest_json(&self, raw: &str) -> Result<IngestReport, DomainError> {
        self.ingest_uc.execute_json(raw).await
    }

    pub fn stats(&self) -> Result<IndexStats, DomainError> {
        self.stats_uc.stats()
    }

    /// Index size only; unaffected by the interaction log.
    pub fn indexed_entries(&self) -> Result<usize, DomainError> {
        self.stats_uc.indexed_entries()
    }

    pub fn history(&self, limit: usize) -> Result<Vec<Interaction>, DomainError> {
        self.stats_uc.history(limit)
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }
}

fn open_connection(db_path: &str) -> Result<Connection, DomainError> {
    let conn = Connection::open(db_path).map_err(|e| DomainError::Database(format!("DB error: {e}")))?;
    conn.pragma_update(None, "journal_mode", "WAL")
        .map_err(|e| DomainError::Database(format!("WAL error: {e}")))?;
    run_migrations(&conn)?;
    Ok(conn)
}
