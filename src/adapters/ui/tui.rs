//! Implements InputPort. Inquire-based front-end for the analysis page.
//!
//! Each menu choice becomes a `UiEvent`; the page decides what happens.

use crate::domain::{CandidateFile, DomainError, Severity};
use crate::ports::InputPort;
use crate::usecases::{Effect, Key, Page, UiEvent, ZoneTarget};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Editor, Select, Text};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::renderer;

const WRITE_TEXT: &str = "✍️  Escrever ou colar o texto do email";
const PICK_FILE: &str = "📂 Selecionar arquivo (PDF/TXT)";
const DROP_FILES: &str = "📥 Soltar arquivos (arraste para o terminal)";
const REMOVE_FILE: &str = "🗑️  Remover arquivo";
const ANALYZE: &str = "🔍 Analisar";
const QUIT: &str = "🚪 Sair";

const NEW_ANALYSIS: &str = "🔄 Nova Análise";
const CLOSE: &str = "× Fechar";
const DISMISS: &str = "↩ Voltar ao formulário";

/// Apply the prompt theme for all subsequent inquire prompts.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightBlue))
        .with_highlighted_option_prefix(Styled::new("▶").with_fg(Color::LightMagenta));
    inquire::set_global_render_config(config);
}

/// Split text dropped or pasted into the terminal into paths.
///
/// Terminals separate multiple dropped files with spaces and either quote paths or
/// backslash-escape special characters; some prefix `file://`.
pub fn parse_dropped_paths(raw: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = raw.trim().chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (None, '\\') => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            (None, '\'' | '"') => quote = Some(c),
            (Some(q), c) if c == q => quote = None,
            (None, c) if c.is_whitespace() => {
                if !current.is_empty() {
                    paths.push(std::mem::take(&mut current));
                }
            }
            (_, c) => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(current);
    }

    paths
        .into_iter()
        .map(|p| PathBuf::from(p.strip_prefix("file://").unwrap_or(&p)))
        .collect()
}

/// Candidate for a terminal drop. Only the first path counts; the rest are ignored
/// even when the first cannot be read.
pub async fn dropped_candidate(raw: &str) -> Result<Option<CandidateFile>, DomainError> {
    let paths = parse_dropped_paths(raw);
    let Some(first) = paths.first() else {
        return Ok(None);
    };
    if paths.len() > 1 {
        debug!(ignored = paths.len() - 1, "extra dropped paths ignored");
    }
    CandidateFile::from_path(first).await.map(Some)
}

/// Modal menu choice to page event. Leaving the result without a button counts
/// as a click outside of it.
fn modal_event(choice: &str) -> UiEvent {
    match choice {
        NEW_ANALYSIS => UiEvent::NewAnalysisClicked,
        CLOSE => UiEvent::ModalCloseClicked,
        DISMISS => UiEvent::ModalClicked { on_backdrop: true },
        _ => UiEvent::CopyReplyClicked,
    }
}

/// TUI adapter. Inquire prompts driving a single page.
pub struct TuiInputPort {
    page: Mutex<Page>,
}

impl TuiInputPort {
    pub fn new(page: Page) -> Self {
        Self {
            page: Mutex::new(page),
        }
    }

    fn prompt_error(e: InquireError) -> DomainError {
        DomainError::Io(e.to_string())
    }

    async fn write_text(page: &mut Page) -> Result<(), DomainError> {
        let current = page.ui().input.text().to_string();
        let text = Editor::new("Texto do email:")
            .with_predefined_text(&current)
            .prompt();
        match text {
            Ok(text) => {
                page.dispatch(UiEvent::TextInput(text)).await;
                Ok(())
            }
            Err(InquireError::OperationCanceled) => Ok(()),
            Err(e) => Err(Self::prompt_error(e)),
        }
    }

    async fn pick_file(page: &mut Page) -> Result<(), DomainError> {
        let effects = page.dispatch(UiEvent::ZoneClick(ZoneTarget::Zone)).await;
        if !effects.contains(&Effect::OpenFilePicker) {
            return Ok(());
        }
        let path = match Text::new("Caminho do arquivo (.pdf ou .txt):").prompt() {
            Ok(path) if !path.trim().is_empty() => path,
            Ok(_) | Err(InquireError::OperationCanceled) => return Ok(()),
            Err(e) => return Err(Self::prompt_error(e)),
        };
        let Some(path) = parse_dropped_paths(&path).into_iter().next() else {
            return Ok(());
        };
        match CandidateFile::from_path(&path).await {
            Ok(file) => {
                page.dispatch(UiEvent::FilePicked(file)).await;
            }
            Err(e) => page.notify(e.to_string(), Severity::Error),
        }
        Ok(())
    }

    async fn drop_files(page: &mut Page) -> Result<(), DomainError> {
        page.dispatch(UiEvent::DragEnter).await;
        let raw = match Text::new("Arraste os arquivos para cá e pressione Enter:").prompt() {
            Ok(raw) => raw,
            Err(InquireError::OperationCanceled) => String::new(),
            Err(e) => return Err(Self::prompt_error(e)),
        };
        match dropped_candidate(&raw).await {
            Ok(Some(file)) => {
                page.dispatch(UiEvent::Drop(vec![file])).await;
            }
            Ok(None) => {
                page.dispatch(UiEvent::DragLeave).await;
            }
            Err(e) => {
                page.notify(e.to_string(), Severity::Error);
                page.dispatch(UiEvent::DragLeave).await;
            }
        }
        Ok(())
    }

    async fn analyze(page: &mut Page) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Analisando...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        if let Ok(ticket) = page.begin_submit() {
            let result = ticket.send().await;
            page.finish_submit(result);
        }
        spinner.finish_and_clear();
    }

    async fn modal_menu(page: &mut Page) -> Result<(), DomainError> {
        let Some(modal) = page.ui().presenter.modal() else {
            return Ok(());
        };
        renderer::render_modal(&mut stdout(), modal).map_err(|e| DomainError::Io(e.to_string()))?;
        let copy = modal.copy_button_label();
        let options = vec![copy, NEW_ANALYSIS, CLOSE, DISMISS];

        let event = match Select::new("Resultado:", options).prompt() {
            Ok(choice) => modal_event(choice),
            Err(InquireError::OperationCanceled) => UiEvent::KeyDown(Key::Escape),
            Err(e) => return Err(Self::prompt_error(e)),
        };
        page.dispatch(event).await;
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut page = self.page.lock().await;
        loop {
            page.tick();
            if let Some(toast) = page.ui().notifier.current() {
                renderer::render_toast(&mut stdout(), toast)
                    .map_err(|e| DomainError::Io(e.to_string()))?;
            }

            if page.ui().presenter.is_open() {
                Self::modal_menu(&mut page).await?;
                continue;
            }

            renderer::render_form(&mut stdout(), page.ui())
                .map_err(|e| DomainError::Io(e.to_string()))?;

            let mut options = vec![WRITE_TEXT, PICK_FILE, DROP_FILES];
            if page.ui().input.file().is_some() {
                options.push(REMOVE_FILE);
            }
            options.extend([ANALYZE, QUIT]);

            let choice = match Select::new("O que deseja fazer?", options).prompt() {
                Ok(choice) => choice,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => QUIT,
                Err(e) => return Err(Self::prompt_error(e)),
            };

            match choice {
                WRITE_TEXT => Self::write_text(&mut page).await?,
                PICK_FILE => Self::pick_file(&mut page).await?,
                DROP_FILES => Self::drop_files(&mut page).await?,
                REMOVE_FILE => {
                    page.dispatch(UiEvent::ZoneClick(ZoneTarget::RemoveButton))
                        .await;
                }
                ANALYZE => Self::analyze(&mut page).await,
                _ => {
                    info!("leaving");
                    return Ok(());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_space_separated_paths() {
        assert_eq!(
            parse_dropped_paths("/tmp/a.pdf /tmp/b.txt"),
            vec![PathBuf::from("/tmp/a.pdf"), PathBuf::from("/tmp/b.txt")]
        );
    }

    #[test]
    fn honours_quotes_and_escapes() {
        assert_eq!(
            parse_dropped_paths(r#"'/tmp/my mail.pdf' "/tmp/x y.txt" /tmp/z\ w.txt"#),
            vec![
                PathBuf::from("/tmp/my mail.pdf"),
                PathBuf::from("/tmp/x y.txt"),
                PathBuf::from("/tmp/z w.txt"),
            ]
        );
    }

    #[tokio::test]
    async fn drop_uses_only_the_first_path() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        tokio::fs::write(&real, b"hello").await.unwrap();
        let missing = dir.path().join("missing.pdf");

        let raw = format!("{} {}", missing.display(), real.display());
        assert!(matches!(
            dropped_candidate(&raw).await,
            Err(DomainError::Io(_))
        ));

        let raw = format!("{} {}", real.display(), missing.display());
        let file = dropped_candidate(&raw).await.unwrap().unwrap();
        assert_eq!(file.name, "real.txt");

        assert!(dropped_candidate("  ").await.unwrap().is_none());
    }

    #[test]
    fn modal_choices_map_to_close_triggers() {
        assert_eq!(modal_event(CLOSE), UiEvent::ModalCloseClicked);
        assert_eq!(modal_event(DISMISS), UiEvent::ModalClicked { on_backdrop: true });
        assert_eq!(modal_event(NEW_ANALYSIS), UiEvent::NewAnalysisClicked);
        assert_eq!(modal_event("✓ Copiado!"), UiEvent::CopyReplyClicked);
    }

    #[test]
    fn strips_file_scheme_and_blank_input() {
        assert_eq!(
            parse_dropped_paths("file:///home/u/a.pdf"),
            vec![PathBuf::from("/home/u/a.pdf")]
        );
        assert!(parse_dropped_paths("   ").is_empty());
    }
}
