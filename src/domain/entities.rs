//! Domain entities. Pure data structures for the page core.
//!
//! No HTTP/terminal types here; adapters map into these.

use crate::domain::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Largest file accepted for analysis (10 MiB).
pub const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Lowercase extensions the analysis endpoint understands.
pub const ACCEPTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// Where the bytes of a candidate file live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// On disk; read lazily when the request is built.
    Path(PathBuf),
    /// Already in memory (drops from a paste buffer, tests).
    Memory(Vec<u8>),
}

/// A file offered through the pick or drop channel, before or after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub byte_size: u64,
    pub source: FileSource,
}

impl CandidateFile {
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Metadata-only candidate. Used when the size is known but the content is not needed yet.
    pub fn with_size(name: impl Into<String>, byte_size: u64, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            byte_size,
            source: FileSource::Path(path.as_ref().to_path_buf()),
        }
    }

    /// Stat a file on disk. The name is the final path component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        if !meta.is_file() {
            return Err(DomainError::Io(format!("{}: not a file", path.display())));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::with_size(name, meta.len(), path))
    }

    /// Lowercase text after the last `.`; empty when the name has no dot.
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }

    /// Size in MiB with two decimals, as shown on the file badge.
    pub fn size_mb_label(&self) -> String {
        format!("{:.2}", self.byte_size as f64 / (1024.0 * 1024.0))
    }

    /// MIME type sent with the multipart part.
    pub fn mime(&self) -> &'static str {
        match self.extension().as_str() {
            "pdf" => "application/pdf",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }

    pub async fn read_bytes(&self) -> Result<Vec<u8>, DomainError> {
        match &self.source {
            FileSource::Memory(bytes) => Ok(bytes.clone()),
            FileSource::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}

/// The user's current candidate submission: trimmed text and/or one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedInput {
    pub text: Option<String>,
    pub file: Option<CandidateFile>,
}

impl SelectedInput {
    /// Trims `raw_text`; whitespace-only text counts as absent.
    pub fn new(raw_text: &str, file: Option<CandidateFile>) -> Self {
        let trimmed = raw_text.trim();
        Self {
            text: (!trimmed.is_empty()).then(|| trimmed.to_string()),
            file,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.file.is_none()
    }
}

/// Why the Validator refused a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    SizeExceeded,
    UnsupportedFormat,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::SizeExceeded => {
                write!(f, "Arquivo muito grande! Tamanho máximo: 10MB.")
            }
            ValidationReason::UnsupportedFormat => {
                write!(f, "Formato não suportado! Use apenas PDF ou TXT.")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationVerdict {
    pub accepted: bool,
    pub reason: Option<ValidationReason>,
}

impl ValidationVerdict {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            reason: None,
        }
    }

    pub fn reject(reason: ValidationReason) -> Self {
        Self {
            accepted: false,
            reason: Some(reason),
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self.reason {
            Some(reason) if !self.accepted => Err(DomainError::Validation(reason)),
            _ => Ok(()),
        }
    }
}

/// Analysis block of the server payload. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawAnalysis {
    pub categoria: Option<String>,
    pub categoria_nome: Option<String>,
    pub categoria_emoji: Option<String>,
    pub utilidade: Option<f64>,
    pub departamento: Option<String>,
    pub prioridade: Option<String>,
    pub acao_necessaria: Option<bool>,
    pub confianca_ia: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub resumo: Option<String>,
    pub protocolo: Option<String>,
    pub fonte: Option<String>,
}

/// Body of a 2xx reply from `POST /analyze`. Consumed, never owned: defaults are applied
/// by the presenter, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResponse {
    pub is_useful: Option<bool>,
    pub analysis: Option<RawAnalysis>,
    pub auto_response: Option<String>,
    pub analysis_source: Option<String>,
}

/// Raw HTTP reply handed back by the transport; parsing belongs to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn color(self) -> Rgb {
        match self {
            Severity::Error => Rgb(0xdc, 0x35, 0x45),
            Severity::Success => Rgb(0x28, 0xa7, 0x45),
            Severity::Info => Rgb(0x00, 0x7b, 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiNotification {
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Loading,
    Completed,
    Failed,
}

/// 8-bit RGB colour. Displays as CSS `rgb(r, g, b)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_text_after_last_dot() {
        let f = CandidateFile::from_bytes("Relatorio.Final.PDF", vec![]);
        assert_eq!(f.extension(), "pdf");
        assert_eq!(CandidateFile::from_bytes("README", vec![]).extension(), "");
        assert_eq!(CandidateFile::from_bytes("notes.", vec![]).extension(), "");
    }

    #[test]
    fn size_label_has_two_decimals() {
        let f = CandidateFile::with_size("a.pdf", 1536 * 1024, "/tmp/a.pdf");
        assert_eq!(f.size_mb_label(), "1.50");
    }

    #[test]
    fn selected_input_trims_and_drops_blank_text() {
        let input = SelectedInput::new("   \n\t ", None);
        assert!(input.is_empty());

        let input = SelectedInput::new("  Hello \n", None);
        assert_eq!(input.text.as_deref(), Some("Hello"));
        assert!(!input.is_empty());
    }

    #[test]
    fn analysis_response_tolerates_missing_and_null_fields() {
        let resp: AnalysisResponse =
            serde_json::from_str(r#"{"is_useful": null, "analysis": {"tags": null}}"#).unwrap();
        assert_eq!(resp.is_useful, None);
        assert_eq!(resp.analysis.unwrap().tags, None);

        let empty: AnalysisResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, AnalysisResponse::default());
    }

    #[test]
    fn rgb_displays_as_css() {
        assert_eq!(Rgb(13, 110, 253).to_string(), "rgb(13, 110, 253)");
    }

    #[tokio::test]
    async fn from_path_reads_name_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mail.txt");
        tokio::fs::write(&path, b"hello").await.unwrap();

        let f = CandidateFile::from_path(&path).await.unwrap();
        assert_eq!(f.name, "mail.txt");
        assert_eq!(f.byte_size, 5);
        assert_eq!(f.read_bytes().await.unwrap(), b"hello");
    }
}
