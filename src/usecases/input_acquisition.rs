//! Input acquisition. Text entry, click-to-pick and drag-and-drop all land in one
//! selected-input state; both file channels go through the same Validator.

use crate::domain::{CandidateFile, DomainError, SelectedInput, validate};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Border pulse after a file is adopted.
pub const ACCEPT_FLASH: Duration = Duration::from_millis(1000);
/// Border pulse after the file is removed.
pub const REMOVE_FLASH: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Accepted,
    Removed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub until: Instant,
}

/// "File selected" badge inside the drop zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBadge {
    pub name: String,
    pub size_mb: String,
}

impl FileBadge {
    pub fn label(&self) -> String {
        format!("📄 {} ({} MB)", self.name, self.size_mb)
    }
}

/// What was clicked inside the drop zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTarget {
    Zone,
    RemoveButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneAction {
    OpenPicker,
    FileRemoved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Enter,
    Over,
    Leave,
}

#[derive(Debug, Default)]
pub struct InputAcquisition {
    text: String,
    file: Option<CandidateFile>,
    badge: Option<FileBadge>,
    hovered: bool,
    dragging: bool,
    flash: Option<Flash>,
    text_focused: bool,
}

impl InputAcquisition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror of the text input's raw value.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.text = value.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn badge(&self) -> Option<&FileBadge> {
        self.badge.as_ref()
    }

    pub fn flash(&self) -> Option<Flash> {
        self.flash
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_text_focused(&self) -> bool {
        self.text_focused
    }

    pub fn hover(&mut self, inside: bool) {
        self.hovered = inside;
    }

    /// Clicking the remove control never reaches the zone's picker handler.
    pub fn click_zone(&mut self, target: ZoneTarget) -> ZoneAction {
        match target {
            ZoneTarget::RemoveButton => {
                self.remove_file();
                ZoneAction::FileRemoved
            }
            ZoneTarget::Zone => ZoneAction::OpenPicker,
        }
    }

    /// Click-to-pick channel.
    pub fn pick(&mut self, file: CandidateFile) -> Result<(), DomainError> {
        self.adopt(file, "pick")
    }

    pub fn drag(&mut self, kind: DragKind) {
        self.dragging = !matches!(kind, DragKind::Leave);
    }

    /// Drop channel. Only the first file counts; an empty drop is a no-op.
    pub fn drop_files(&mut self, files: Vec<CandidateFile>) -> Result<bool, DomainError> {
        self.dragging = false;
        let Some(first) = files.into_iter().next() else {
            debug!("drop without files ignored");
            return Ok(false);
        };
        self.adopt(first, "drop").map(|_| true)
    }

    /// Clear the file. Text is left alone.
    pub fn remove_file(&mut self) {
        if let Some(file) = self.file.take() {
            info!(name = %file.name, "file removed");
        }
        self.badge = None;
        self.flash = Some(Flash {
            kind: FlashKind::Removed,
            until: Instant::now() + REMOVE_FLASH,
        });
    }

    /// Snapshot for submission; text is read fresh and trimmed.
    pub fn selected_input(&self) -> SelectedInput {
        SelectedInput::new(&self.text, self.file.clone())
    }

    /// Back to a blank form with the text input focused.
    pub fn reset(&mut self) {
        self.text.clear();
        self.file = None;
        self.badge = None;
        self.text_focused = true;
    }

    pub fn sweep(&mut self, now: Instant) {
        if self.flash.is_some_and(|f| now >= f.until) {
            self.flash = None;
        }
    }

    fn adopt(&mut self, file: CandidateFile, channel: &'static str) -> Result<(), DomainError> {
        if let Err(e) = validate(&file).into_result() {
            warn!(channel, name = %file.name, size = file.byte_size, error = %e, "file rejected");
            return Err(e);
        }
        info!(channel, name = %file.name, size = file.byte_size, "file selected");
        self.badge = Some(FileBadge {
            name: file.name.clone(),
            size_mb: file.size_mb_label(),
        });
        self.file = Some(file);
        self.flash = Some(Flash {
            kind: FlashKind::Accepted,
            until: Instant::now() + ACCEPT_FLASH,
        });
        Ok(())
    }
}
