//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. `Display` is the text the
//! notifier shows the user.

use crate::domain::ValidationReason;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Oversized or wrong-extension file. Input is rejected, nothing else changes.
    #[error("{0}")]
    Validation(ValidationReason),

    /// Neither text nor file at submit time. No request is issued.
    #[error("Por favor, insira o texto do email ou selecione um arquivo para análise.")]
    EmptySubmission,

    /// No response obtained, or the body was not valid JSON.
    #[error("{0}")]
    Transport(String),

    /// Non-2xx reply. `message` is the server's `error` field or "Erro {status}".
    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Não foi possível copiar para a área de transferência.")]
    Clipboard(String),

    /// A required page element is absent at setup. Fatal for the page only.
    #[error("Elementos do formulário não encontrados: {0}")]
    MissingElement(&'static str),

    #[error("Falha ao ler arquivo: {0}")]
    Io(String),
}
