//! Runtime configuration read from `REMEDY_*` environment variables.

use crate::domain::error::DomainError;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingProviderKind {
    Hashing,
    OpenAi,
    Voyage,
    Noop,
}

impl FromStr for EmbeddingProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hashing" | "local" => Ok(Self::Hashing),
            "openai" => Ok(Self::OpenAi),
            "voyage" => Ok(Self::Voyage),
            "noop" | "none" => Ok(Self::Noop),
            _ => Err(format!("Unknown embedding provider: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractorKind {
    /// Fixed vocabulary scan.
    Keyword,
    /// Remote sequence-labeling model only.
    Ner,
    /// Model first, vocabulary scan when the model finds nothing.
    Chain,
}

impl FromStr for ExtractorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(Self::Keyword),
            "ner" | "model" => Ok(Self::Ner),
            "chain" => Ok(Self::Chain),
            _ => Err(format!("Unknown extractor: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    OpenAi,
    Disabled,
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "none" | "disabled" => Ok(Self::Disabled),
            _ => Err(format!("Unknown generator: {s}")),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub db_path: String,
    pub bind: String,
    pub top_k: usize,
    pub embedding_provider: EmbeddingProviderKind,
    pub embedding_api_key: String,
    pub embedding_model: Option<String>,
    pub embedding_base_url: Option<String>,
    pub embedding_dimension: usize,
    pub extractor: ExtractorKind,
    pub ner_url: Option<String>,
    pub raw_query_fallback: bool,
    pub generator: GeneratorKind,
    pub generation_api_key: String,
    pub generation_model: Option<String>,
    pub generation_base_url: Option<String>,
    pub generation_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("db_path", &self.db_path)
            .field("bind", &self.bind)
            .field("top_k", &self.top_k)
            .field("embedding_provider", &self.embedding_provider)
            .field("embedding_model", &self.embedding_model)
            .field("extractor", &self.extractor)
            .field("raw_query_fallback", &self.raw_query_fallback)
            .field("generator", &self.generator)
            .field("generation_model", &self.generation_model)
            .field("generation_timeout", &self.generation_timeout)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let extractor: ExtractorKind = parse_or(&get, "REMEDY_EXTRACTOR", ExtractorKind::Keyword)?;
        let ner_url = get("REMEDY_NER_URL");
        if extractor != ExtractorKind::Keyword && ner_url.is_none() {
            return Err(DomainError::Config(
                "REMEDY_NER_URL is required when REMEDY_EXTRACTOR is 'ner' or 'chain'".into(),
            ));
        }
        let raw_query_fallback = match get("REMEDY_RAW_QUERY_FALLBACK") {
            Some(v) => parse_bool("REMEDY_RAW_QUERY_FALLBACK", &v)?,
            None => extractor == ExtractorKind::Ner,
        };

        let top_k: usize = parse_or(&get, "REMEDY_TOP_K", 3)?;
        if top_k == 0 {
            return Err(DomainError::Config("REMEDY_TOP_K must be at least 1".into()));
        }

        Ok(Self {
            db_path: get("REMEDY_DB").unwrap_or_else(|| "./remedy_finder.db".into()),
            bind: get("REMEDY_BIND").unwrap_or_else(|| "127.0.0.1:8000".into()),
            top_k,
            embedding_provider: parse_or(&get, "REMEDY_EMBEDDING_PROVIDER", EmbeddingProviderKind::Hashing)?,
            embedding_api_key: get("REMEDY_EMBEDDING_API_KEY").unwrap_or_default(),
            embedding_model: get("REMEDY_EMBEDDING_MODEL"),
            embedding_base_url: get("REMEDY_EMBEDDING_BASE_URL"),
            embedding_dimension: parse_or(
                &get,
                "REMEDY_EMBEDDING_DIMENSION",
                crate::infrastructure::embeddings::hashing::DEFAULT_DIMENSION,
            )?,
            extractor,
            ner_url,
            raw_query_fallback,
            generator: parse_or(&get, "REMEDY_GENERATOR", GeneratorKind::Disabled)?,
            generation_api_key: get("REMEDY_GENERATION_API_KEY").unwrap_or_default(),
            generation_model: get("REMEDY_GENERATION_MODEL"),
            generation_base_url: get("REMEDY_GENERATION_BASE_URL"),
            generation_timeout: Duration::from_secs(parse_or(&get, "REMEDY_GENERATION_TIMEOUT_SECS", 30)?),
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(v) => v
            .parse()
            .map_err(|e| DomainError::Config(format!("{key}={v}: {e}"))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::Config(format!("{key}={value}: expected a boolean"))),
    }
}
