use crate::domain::error::DomainError;
use crate::domain::ports::text_generator::TextGenerator;
use async_trait::async_trait;

/// Always unavailable; recommendations are templated from the top match.
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    fn name(&self) -> &str {
        "disabled"
    }

    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> Result<String, DomainError> {
        Err(DomainError::GenerationUnavailable("text generation is disabled".into()))
    }
}
