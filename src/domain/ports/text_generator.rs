use crate::domain::error::DomainError;
use async_trait::async_trait;

/// External text-generation service. Treated as a black box: prompt in, free text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;

    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, DomainError>;
}
