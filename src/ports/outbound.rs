//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{DomainError, HttpReply, SelectedInput};

/// Analysis endpoint. One call per submission.
#[async_trait::async_trait]
pub trait AnalyzePort: Send + Sync {
    /// POST the present parts of `input` (`email_text` and/or `file`) and return the raw reply.
    ///
    /// Returns `DomainError::Transport` when no response was obtained. A non-2xx status is
    /// NOT an error at this level; the caller inspects `HttpReply::status`.
    async fn analyze(&self, input: &SelectedInput) -> Result<HttpReply, DomainError>;
}

/// System clipboard.
#[async_trait::async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Returns `DomainError::Clipboard` when access is denied or unavailable.
    async fn write_text(&self, text: &str) -> Result<(), DomainError>;
}
