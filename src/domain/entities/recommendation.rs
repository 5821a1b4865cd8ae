use crate::domain::entities::indexed_entry::IndexHit;
use crate::domain::values::distance::similarity_from_distance;
use serde::Serialize;

pub const NO_SYMPTOMS_MESSAGE: &str = "I'm sorry, I couldn't identify any symptoms in your input. Please provide more details about your symptoms.";

/// A retrieved disease/remedy candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub symptoms: String,
    pub disease: String,
    pub dosha: String,
    pub remedy: String,
    pub similarity: f64,
    #[serde(skip)]
    distance: f64,
}

impl Match {
    pub fn from_hit(hit: IndexHit) -> Self {
        Self {
            similarity: similarity_from_distance(hit.distance),
            distance: hit.distance,
            symptoms: hit.document,
            disease: hit.metadata.disease,
            dosha: hit.metadata.dosha,
            remedy: hit.metadata.remedy,
        }
    }

    /// Distance reported by the index for this match.
    pub fn distance(&self) -> f64 {
        self.distance
    }
}

/// Symptoms and matches that produced a recommendation.
#[derive(Debug, Clone, Serialize)]
pub struct Retrieval {
    pub extracted_symptoms: Vec<String>,
    pub matches: Vec<Match>,
    pub recommendation: String,
}

/// Outcome of one query.
///
/// `Empty` serializes as `{"recommendation": ...}` only; the other variants
/// carry the extracted symptoms and matches as well.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum RecommendationResponse {
    Empty { recommendation: String },
    MatchesOnly(Retrieval),
    Generated(Retrieval),
}

impl RecommendationResponse {
    pub fn empty() -> Self {
        RecommendationResponse::Empty {
            recommendation: NO_SYMPTOMS_MESSAGE.to_string(),
        }
    }

    pub fn recommendation(&self) -> &str {
        match self {
            RecommendationResponse::Empty { recommendation } => recommendation,
            RecommendationResponse::MatchesOnly(r) | RecommendationResponse::Generated(r) => {
                &r.recommendation
            }
        }
    }

    pub fn matches(&self) -> &[Match] {
        match self {
            RecommendationResponse::Empty { .. } => &[],
            RecommendationResponse::MatchesOnly(r) | RecommendationResponse::Generated(r) => {
                &r.matches
            }
        }
    }

    pub fn extracted_symptoms(&self) -> &[String] {
        match self {
            RecommendationResponse::Empty { .. } => &[],
            RecommendationResponse::MatchesOnly(r) | RecommendationResponse::Generated(r) => {
                &r.extracted_symptoms
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RecommendationResponse::Empty { .. })
    }
}
