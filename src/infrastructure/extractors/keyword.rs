use crate::domain::ports::symptom_extractor::{normalize_phrases, SymptomExtractor};
use async_trait::async_trait;

/// Common complaints, also served as input suggestions.
pub const DEFAULT_VOCABULARY: &[&str] = &[
    "headache",
    "stomach pain",
    "fatigue",
    "anxiety",
    "insomnia",
    "nausea",
    "acidity",
    "heartburn",
    "indigestion",
    "bloating",
    "constipation",
    "diarrhea",
    "fever",
    "cough",
    "sore throat",
    "cold",
    "joint pain",
    "back pain",
    "dry skin",
    "itching",
    "rash",
    "acne",
    "pimples",
    "eczema",
    "hair loss",
    "dizziness",
    "stress",
    "weight gain",
];

/// Fallback extractor: reports every vocabulary entry that occurs in the
/// input as a case-insensitive substring, in vocabulary order.
pub struct KeywordExtractor {
    vocabulary: Vec<String>,
}

impl KeywordExtractor {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: normalize_phrases(vocabulary),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn scan(&self, text: &str) -> Vec<String> {
        let haystack = text.to_lowercase();
        self.vocabulary
            .iter()
            .filter(|term| haystack.contains(&term.to_lowercase()))
            .cloned()
            .collect()
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_VOCABULARY)
    }
}

#[async_trait]
impl SymptomExtractor for KeywordExtractor {
    fn name(&self) -> &str {
        "keyword"
    }

    async fn extract(&self, text: &str) -> Vec<String> {
        self.scan(text)
    }
}
