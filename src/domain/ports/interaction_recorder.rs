use crate::domain::entities::interaction::Interaction;
use crate::domain::error::DomainError;

pub trait InteractionRecorder: Send + Sync {
    fn record(&self, interaction: &Interaction) -> Result<(), DomainError>;
    /// Most recent interactions first.
    fn recent(&self, limit: usize) -> Result<Vec<Interaction>, DomainError>;
    fn count(&self) -> Result<usize, DomainError>;
}
