use async_trait::async_trait;

/// Maps free text to symptom phrases.
///
/// Extraction never fails: strategies that cannot reach their backend log the
/// problem and return no phrases.
#[async_trait]
pub trait SymptomExtractor: Send + Sync {
    fn name(&self) -> &str;

    async fn extract(&self, text: &str) -> Vec<String>;
}

/// Trims phrases, drops blanks and case-insensitive duplicates, keeping first-seen order.
pub fn normalize_phrases<I, S>(phrases: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen: Vec<String> = Vec::new();
    let mut out = Vec::new();
    for phrase in phrases {
        let trimmed = phrase.as_ref().trim();
        if trimmed.is_empty() {
            continue;
        }
        let key = trimmed.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        out.push(trimmed.to_string());
    }
    out
}
