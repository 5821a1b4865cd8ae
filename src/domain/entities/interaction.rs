use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit record of one query/response cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub id: String,
    pub user_query: String,
    pub extracted_symptoms: String,
    pub system_response: String,
    pub score: Option<f64>,
    pub model_response: String,
    pub created_at: DateTime<Utc>,
}

impl Interaction {
    pub fn new(
        user_query: String,
        extracted_symptoms: String,
        system_response: String,
        score: Option<f64>,
        model_response: String,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_query,
            extracted_symptoms,
            system_response,
            score,
            model_response,
            created_at: Utc::now(),
        }
    }
}
