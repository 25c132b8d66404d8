//! Inbound port. Front-end (adapter) drives the page through this.

use crate::domain::DomainError;

/// Input port: an interactive front-end that feeds user events into the page.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interaction loop until the user quits.
    async fn run(&self) -> Result<(), DomainError>;
}
