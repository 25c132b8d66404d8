//! Clipboard adapter. Implements ClipboardPort with the OSC 52 terminal escape,
//! which works over SSH and inside multiplexers that forward it.

use crate::domain::DomainError;
use crate::ports::ClipboardPort;
use crossterm::ExecutableCommand;
use crossterm::clipboard::CopyToClipboard;
use std::io::stdout;
use tracing::debug;

#[derive(Debug, Default)]
pub struct Osc52Clipboard;

impl Osc52Clipboard {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl ClipboardPort for Osc52Clipboard {
    async fn write_text(&self, text: &str) -> Result<(), DomainError> {
        stdout()
            .execute(CopyToClipboard::to_clipboard_from(text))
            .map_err(|e| DomainError::Clipboard(e.to_string()))?;
        debug!(len = text.len(), "OSC 52 clipboard write");
        Ok(())
    }
}
