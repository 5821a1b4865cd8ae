use crate::domain::entities::symptom_record::SymptomRecord;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_index::VectorIndex;
use crate::domain::values::dosha::DoshaSet;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

const EMBED_BATCH_SIZE: usize = 32;

/// Outcome of an ingestion run.
#[derive(Debug, Default, Serialize)]
pub struct IngestReport {
    pub records_seen: usize,
    pub records_ingested: usize,
    pub records_skipped: usize,
    pub entries_upserted: usize,
    pub errors: Vec<String>,
}

/// Offline batch that turns the disease dataset into index entries,
/// one per symptom sentence.
pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    pub async fn execute_file(&self, path: &Path) -> Result<IngestReport, DomainError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::InvalidInput(format!("Cannot read {}: {e}", path.display())))?;
        self.execute_json(&raw).await
    }

    pub async fn execute_json(&self, raw: &str) -> Result<IngestReport, DomainError> {
        let data: Value = serde_json::from_str(raw).map_err(|e| DomainError::Parse(format!("Invalid dataset JSON: {e}")))?;
        let Value::Array(entries) = data else {
            return Err(DomainError::Parse("Dataset must be a JSON array of records".into()));
        };
        self.execute(&entries).await
    }

    pub async fn execute(&self, entries: &[Value]) -> Result<IngestReport, DomainError> {
        let mut report = IngestReport {
            records_seen: entries.len(),
            ..Default::default()
        };

        let mut records = Vec::new();
        for (i, entry) in entries.iter().enumerate() {
            match parse_record(i, entry) {
                Ok(mut parsed) => {
                    report.records_ingested += 1;
                    records.append(&mut parsed);
                }
                Err(e) => {
                    warn!(record = i, error = %e, "skipping record");
                    report.records_skipped += 1;
                    report.errors.push(format!("record {i}: {e}"));
                }
            }
        }

        for chunk in records.chunks(EMBED_BATCH_SIZE) {
            let texts: Vec<String> = chunk.iter().map(|r| r.symptom_text.clone()).collect();
            let vectors = self.embedder.embed(&texts, InputType::Document).await?;
            if vectors.len() != chunk.len() {
                return Err(DomainError::Embedding(format!(
                    "expected {} vectors, encoder returned {}",
                    chunk.len(),
                    vectors.len()
                )));
            }
            if vectors.iter().any(|v| v.is_empty()) {
                return Err(DomainError::Embedding(
                    "encoder returned empty vectors; configure an embedding provider before ingesting".into(),
                ));
            }
            let batch: Vec<_> = chunk
                .iter()
                .cloned()
                .zip(vectors)
                .map(|(record, vector)| record.into_entry(vector))
                .collect();
            self.index.upsert_many(&batch)?;
            report.entries_upserted += batch.len();
        }

        info!(
            seen = report.records_seen,
            ingested = report.records_ingested,
            skipped = report.records_skipped,
            upserted = report.entries_upserted,
            "ingestion finished"
        );
        Ok(report)
    }
}

/// Validates one dataset entry and splits it into per-sentence records.
pub fn parse_record(entry_index: usize, entry: &Value) -> Result<Vec<SymptomRecord>, DomainError> {
    let malformed = |msg: &str| DomainError::MalformedRecord(msg.to_string());

    let obj = entry.as_object().ok_or_else(|| malformed("not a JSON object"))?;

    let disease = obj
        .get("disease")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| malformed("missing disease"))?;

    let dosha_values: Vec<&str> = obj
        .get("primary_dosha")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("primary_dosha must be an array"))?
        .iter()
        .map(|v| v.as_str().ok_or_else(|| malformed("primary_dosha values must be strings")))
        .collect::<Result<_, _>>()?;
    let dosha = DoshaSet::parse(&dosha_values).map_err(DomainError::MalformedRecord)?;

    let symptoms = obj
        .get("symptoms")
        .filter(|v| v.is_array())
        .ok_or_else(|| malformed("symptoms must be an array"))?;
    let symptom_sentences = split_sentences(&flatten_text(symptoms).join(" "));
    if symptom_sentences.is_empty() {
        return Err(malformed("no symptom sentences"));
    }

    let remedy_sentences = obj
        .get("remedies")
        .map(|r| split_sentences(&flatten_text(r).join(" ")))
        .unwrap_or_default();
    let all_remedies = remedy_sentences.join(" | ");

    Ok(symptom_sentences
        .into_iter()
        .enumerate()
        .map(|(j, symptom_text)| SymptomRecord {
            entry_index,
            sentence_index: j,
            disease: disease.to_string(),
            dosha: dosha.clone(),
            symptom_text,
            remedy_text: remedy_sentences.get(j).cloned().unwrap_or_else(|| all_remedies.clone()),
        })
        .collect())
}

/// String leaves of a JSON value, depth-first.
pub fn flatten_text(value: &Value) -> Vec<String> {
    let mut out = Vec::new();
    collect_strings(value, &mut out);
    out
}

fn collect_strings(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => items.iter().for_each(|v| collect_strings(v, out)),
        Value::Object(map) => map.values().for_each(|v| collect_strings(v, out)),
        _ => {}
    }
}

/// Splits prose after `.`, `!` or `?` followed by whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        current.push(c);
        let at_boundary = matches!(c, '.' | '!' | '?') && chars.peek().map_or(true, |n| n.is_whitespace());
        if at_boundary {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, s: &str) {
    let trimmed = s.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
