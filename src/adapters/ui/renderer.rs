//! Terminal rendering of page state: toast, form summary and the result modal.
//!
//! Writers are generic so tests can render into a buffer.

use crate::domain::Rgb;
use crate::usecases::UiState;
use crate::usecases::input_acquisition::FlashKind;
use crate::usecases::notifier::Toast;
use crate::usecases::presenter::{REPLY_DISCLAIMER, ResultModal};
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use std::io::{self, Write};

const MUTED: Rgb = Rgb(170, 170, 170);
const BODY: Rgb = Rgb(216, 216, 216);
const ACCEPT: Rgb = Rgb(0x28, 0xa7, 0x45);
const REMOVE: Rgb = Rgb(0xdc, 0x35, 0x45);
const HOVER: Rgb = Rgb(0x00, 0x7b, 0xff);
const TEXT_PREVIEW_CHARS: usize = 60;

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.0,
        g: rgb.1,
        b: rgb.2,
    }
}

fn line(out: &mut impl Write, rgb: Rgb, text: &str) -> io::Result<()> {
    queue!(
        out,
        SetForegroundColor(color(rgb)),
        Print(text),
        ResetColor,
        Print("\n")
    )
}

fn heading(out: &mut impl Write, icon: &str, title: &str) -> io::Result<()> {
    queue!(
        out,
        Print("\n"),
        SetAttribute(Attribute::Bold),
        Print(format!("{} {}", icon, title)),
        SetAttribute(Attribute::Reset),
        Print("\n")
    )
}

pub fn render_toast(out: &mut impl Write, toast: &Toast) -> io::Result<()> {
    if toast.is_exiting() {
        return Ok(());
    }
    let n = &toast.notification;
    line(out, n.severity.color(), &format!("▌ {}", n.message))?;
    out.flush()
}

/// One-screen summary of the form: text preview, selected file, zone state.
pub fn render_form(out: &mut impl Write, ui: &UiState) -> io::Result<()> {
    let text = ui.input.text().trim();
    let preview = if text.is_empty() {
        "(vazio)".to_string()
    } else {
        let mut p: String = text.chars().take(TEXT_PREVIEW_CHARS).collect();
        if text.chars().count() > TEXT_PREVIEW_CHARS {
            p.push('…');
        }
        p.replace('\n', " ")
    };
    heading(out, "✉️", "Email")?;
    line(out, BODY, &preview)?;

    let zone_color = match ui.input.flash().map(|f| f.kind) {
        Some(FlashKind::Accepted) => ACCEPT,
        Some(FlashKind::Removed) => REMOVE,
        None if ui.input.is_dragging() || ui.input.is_hovered() => HOVER,
        None => MUTED,
    };
    match ui.input.badge() {
        Some(badge) => line(out, zone_color, &format!("📎 {}", badge.label()))?,
        None => line(out, zone_color, "📎 Nenhum arquivo (PDF ou TXT, até 10MB)")?,
    }
    if ui.loading.is_some() {
        line(out, MUTED, "⏳ Analisando...")?;
    }
    out.flush()
}

pub fn render_modal(out: &mut impl Write, modal: &ResultModal) -> io::Result<()> {
    let v = &modal.view;

    queue!(
        out,
        Print("\n"),
        SetAttribute(Attribute::Bold),
        Print("Resultados da Análise"),
        SetAttribute(Attribute::Reset),
        Print("\n")
    )?;
    line(out, v.source.color, &format!("{} {}", v.source.icon, v.source.text))?;

    queue!(out, Print("\n"), SetAttribute(Attribute::Bold))?;
    line(out, v.usefulness_color, &v.badge_text())?;
    queue!(out, SetAttribute(Attribute::Reset))?;
    line(out, BODY, &v.relevance_line())?;

    out.write_all(b"\n")?;
    for card in v.cards() {
        queue!(
            out,
            SetForegroundColor(color(MUTED)),
            Print(format!("{:<16}", card.title)),
            ResetColor
        )?;
        line(out, card.color, &format!("{} {}", card.icon, card.value))?;
    }

    heading(out, "📋", "RESUMO DA ANÁLISE")?;
    line(out, BODY, &v.summary)?;

    if let Some(tags) = v.tags_section() {
        heading(out, "🏷️", "TAGS IDENTIFICADAS")?;
        let joined = tags
            .iter()
            .map(|t| format!("[{}]", t))
            .collect::<Vec<_>>()
            .join(" ");
        line(out, v.category_color, &joined)?;
    }

    out.write_all(b"\n")?;
    line(out, MUTED, &format!("PROTOCOLO {}", v.protocol))?;
    line(out, MUTED, &format!("DATA DA ANÁLISE {}", v.analyzed_at))?;

    heading(out, "✉️", "RESPOSTA SUGERIDA")?;
    for reply_line in v.reply_lines() {
        line(out, BODY, reply_line)?;
    }
    line(out, MUTED, REPLY_DISCLAIMER)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AnalysisResponse;
    use crate::usecases::ResultPresenter;

    fn rendered(json: &str) -> String {
        let response: AnalysisResponse = serde_json::from_str(json).unwrap();
        let mut presenter = ResultPresenter::new();
        presenter.present(&response);
        let mut buf = Vec::new();
        render_modal(&mut buf, presenter.modal().unwrap()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn modal_shows_core_fields() {
        let out = rendered(
            r#"{"is_useful": true,
                "analysis": {"categoria": "SPAM", "utilidade": 0.9, "tags": ["urgent"]},
                "auto_response": "Thanks\nBye"}"#,
        );
        assert!(out.contains("90% Útil"));
        assert!(out.contains("TAGS IDENTIFICADAS"));
        assert!(out.contains("[urgent]"));
        assert!(out.contains("Thanks"));
        assert!(out.contains("Bye"));
        assert!(out.contains("38;2;108;117;125"));
    }

    #[tokio::test]
    async fn tag_section_is_omitted_when_empty() {
        let out = rendered(r#"{"analysis": {"tags": []}}"#);
        assert!(!out.contains("TAGS IDENTIFICADAS"));
        assert!(out.contains("Não disponível"));
        assert!(out.contains("N/A"));
    }

    #[tokio::test]
    async fn form_shows_badge_and_preview() {
        let mut ui = UiState::default();
        ui.input.set_text("Olá equipe");
        ui.input
            .pick(crate::domain::CandidateFile::from_bytes("a.pdf", vec![0; 10]))
            .unwrap();
        let mut buf = Vec::new();
        render_form(&mut buf, &ui).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("Olá equipe"));
        assert!(out.contains("a.pdf (0.00 MB)"));
    }
}
