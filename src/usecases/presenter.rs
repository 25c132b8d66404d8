//! Result presenter. Maps an analysis response onto a view (with defaults for every
//! missing field) and owns the single result modal.
//!
//! Flow:
//! 1. `present()` builds a `ResultView` and replaces any modal already attached
//! 2. close button, backdrop click and Escape all go through `close()`
//! 3. the modal detaches after the exit transition (`sweep()`)

use crate::domain::{AnalysisResponse, DomainError, RawAnalysis, Rgb};
use crate::ports::ClipboardPort;
use crate::usecases::notifier::EXIT_TRANSITION;
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How long the copy button shows its "copied" state.
pub const COPY_ACK: Duration = Duration::from_millis(2000);

pub const DEFAULT_CATEGORY: &str = "ROTINA";
pub const DEFAULT_CATEGORY_NAME: &str = "Rotina";
pub const DEFAULT_CATEGORY_EMOJI: &str = "📋";
pub const DEFAULT_SCORE: f64 = 0.5;
pub const DEFAULT_DEPARTMENT: &str = "Sistema";
pub const DEFAULT_PRIORITY: &str = "BAIXA";
pub const DEFAULT_SUMMARY: &str = "Não disponível";
pub const DEFAULT_PROTOCOL: &str = "N/A";
pub const DEFAULT_SOURCE: &str = "local";

pub const REPLY_DISCLAIMER: &str =
    "Resposta automática gerada pela IA. Ajuste conforme necessário antes de enviar.";

const CATEGORY_FALLBACK_COLOR: Rgb = Rgb(133, 57, 255);
const MID_BAND_COLOR: Rgb = Rgb(0, 140, 255);
const LOW_BAND_COLOR: Rgb = Rgb(236, 72, 153);
const ACTION_YES_COLOR: Rgb = Rgb(220, 53, 69);
const ACTION_NO_COLOR: Rgb = Rgb(25, 135, 84);
const DEPARTMENT_COLOR: Rgb = Rgb(0, 140, 255);

/// Colour for a category code; unknown codes get the fallback accent.
pub fn category_color(categoria: &str) -> Rgb {
    match categoria {
        "CURRICULO" => Rgb(124, 58, 237),
        "FINANCEIRO" => Rgb(0, 140, 255),
        "IMPORTANTE" => Rgb(255, 193, 7),
        "PROFISSIONAL" => Rgb(25, 135, 84),
        "SPAM" => Rgb(108, 117, 125),
        "ROTINA" => Rgb(13, 110, 253),
        _ => CATEGORY_FALLBACK_COLOR,
    }
}

/// Colour for a priority tier; unknown tiers share the BAIXA colour.
pub fn priority_color(prioridade: &str) -> Rgb {
    match prioridade {
        "ALTA" => Rgb(220, 53, 69),
        "MÉDIA" => Rgb(255, 193, 7),
        _ => Rgb(108, 117, 125),
    }
}

pub fn priority_icon(prioridade: &str) -> &'static str {
    match prioridade {
        "ALTA" => "🔴",
        "MÉDIA" => "🟡",
        _ => "⚪",
    }
}

/// Two-threshold band: above 70 the category colour, above 40 blue, otherwise pink.
pub fn usefulness_color(useful_percent: u32, category: Rgb) -> Rgb {
    if useful_percent > 70 {
        category
    } else if useful_percent > 40 {
        MID_BAND_COLOR
    } else {
        LOW_BAND_COLOR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLabel {
    pub icon: &'static str,
    pub text: &'static str,
    pub color: Rgb,
}

/// First matching rule wins: real AI, demo AI, contextual, then the generic label.
pub fn source_label(analysis_source: &str, fonte: &str) -> SourceLabel {
    if analysis_source == "ia_real" || fonte == "huggingface_ia" {
        SourceLabel {
            icon: "🤖",
            text: "Análise por IA",
            color: Rgb(124, 58, 237),
        }
    } else if analysis_source == "ia_demo" || fonte == "ia_semantica_demo" {
        SourceLabel {
            icon: "🎯",
            text: "IA de Demonstração",
            color: Rgb(0, 140, 255),
        }
    } else if fonte == "analise_contextual" {
        SourceLabel {
            icon: "🔍",
            text: "Análise Contextual",
            color: Rgb(25, 135, 84),
        }
    } else {
        SourceLabel {
            icon: "⚡",
            text: "Análise Inteligente",
            color: Rgb(255, 193, 7),
        }
    }
}

/// Empty strings count as missing.
fn text_or(value: Option<&String>, default: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| default.to_string())
}

/// Zero and NaN count as missing.
fn score_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| *v != 0.0 && !v.is_nan()).unwrap_or(default)
}

fn percent(score: f64) -> u32 {
    (score * 100.0).round().max(0.0) as u32
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoCard {
    pub title: &'static str,
    pub icon: String,
    pub value: String,
    pub color: Rgb,
}

/// Everything the modal shows, with defaults already applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub source: SourceLabel,
    pub is_useful: bool,
    pub category: String,
    pub category_name: String,
    pub category_emoji: String,
    pub category_color: Rgb,
    pub usefulness: f64,
    pub useful_percent: u32,
    pub usefulness_color: Rgb,
    pub confidence_percent: u32,
    pub department: String,
    pub priority: String,
    pub priority_color: Rgb,
    pub action_required: bool,
    pub summary: String,
    pub tags: Vec<String>,
    pub protocol: String,
    pub analyzed_at: String,
    pub reply: String,
}

impl ResultView {
    /// `rendered_at` becomes the footer timestamp; the server does not send one.
    pub fn build(response: &AnalysisResponse, rendered_at: DateTime<Local>) -> Self {
        let empty = RawAnalysis::default();
        let a = response.analysis.as_ref().unwrap_or(&empty);

        let category = text_or(a.categoria.as_ref(), DEFAULT_CATEGORY);
        let category_name = text_or(
            a.categoria_nome
                .as_ref()
                .filter(|s| !s.is_empty())
                .or(a.categoria.as_ref()),
            DEFAULT_CATEGORY_NAME,
        );
        let category_color = category_color(&category);
        let usefulness = score_or(a.utilidade, DEFAULT_SCORE);
        let useful_percent = percent(usefulness);
        let priority = text_or(a.prioridade.as_ref(), DEFAULT_PRIORITY);
        let analysis_source = text_or(response.analysis_source.as_ref(), DEFAULT_SOURCE);
        let fonte = a.fonte.clone().unwrap_or_default();

        Self {
            source: source_label(&analysis_source, &fonte),
            is_useful: response.is_useful.unwrap_or(false),
            category_emoji: text_or(a.categoria_emoji.as_ref(), DEFAULT_CATEGORY_EMOJI),
            category_name,
            category_color,
            usefulness,
            useful_percent,
            usefulness_color: usefulness_color(useful_percent, category_color),
            confidence_percent: percent(score_or(a.confianca_ia, DEFAULT_SCORE)),
            department: text_or(a.departamento.as_ref(), DEFAULT_DEPARTMENT),
            priority_color: priority_color(&priority),
            priority,
            action_required: a.acao_necessaria.unwrap_or(false),
            summary: text_or(a.resumo.as_ref(), DEFAULT_SUMMARY),
            tags: a.tags.clone().unwrap_or_default(),
            protocol: text_or(a.protocolo.as_ref(), DEFAULT_PROTOCOL),
            analyzed_at: rendered_at.format("%d/%m/%Y %H:%M:%S").to_string(),
            reply: response.auto_response.clone().unwrap_or_default(),
            category,
        }
    }

    pub fn badge_text(&self) -> String {
        format!("{}% Útil", self.useful_percent)
    }

    pub fn relevance_line(&self) -> String {
        let verdict = if self.is_useful {
            "✅ Email Relevante"
        } else {
            "⚠️ Precisa de Análise Manual"
        };
        format!("{} (Confiança: {}%)", verdict, self.confidence_percent)
    }

    /// Info cards in display order: category, action, priority, department.
    pub fn cards(&self) -> [InfoCard; 4] {
        [
            InfoCard {
                title: "CATEGORIA",
                icon: self.category_emoji.clone(),
                value: self.category_name.clone(),
                color: self.category_color,
            },
            InfoCard {
                title: "AÇÃO NECESSÁRIA",
                icon: if self.action_required { "⚠️" } else { "✅" }.to_string(),
                value: if self.action_required { "SIM" } else { "NÃO" }.to_string(),
                color: if self.action_required {
                    ACTION_YES_COLOR
                } else {
                    ACTION_NO_COLOR
                },
            },
            InfoCard {
                title: "PRIORIDADE",
                icon: priority_icon(&self.priority).to_string(),
                value: self.priority.clone(),
                color: self.priority_color,
            },
            InfoCard {
                title: "DEPARTAMENTO",
                icon: "🏢".to_string(),
                value: self.department.clone(),
                color: DEPARTMENT_COLOR,
            },
        ]
    }

    /// `None` when there are no tags: the section is omitted, not rendered empty.
    pub fn tags_section(&self) -> Option<&[String]> {
        (!self.tags.is_empty()).then_some(self.tags.as_slice())
    }

    pub fn reply_lines(&self) -> Vec<&str> {
        self.reply.split('\n').collect()
    }

    /// Reply with newlines turned into `<br>` for markup renderers.
    pub fn reply_html(&self) -> String {
        self.reply.replace('\n', "<br>")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    Button,
    Backdrop,
    Escape,
    /// "New analysis" closes the modal before resetting the form.
    NewAnalysis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Open,
    Closing { until: Instant },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultModal {
    pub id: u64,
    pub view: ResultView,
    pub phase: ModalPhase,
    copied_until: Option<Instant>,
}

impl ResultModal {
    pub fn is_copied(&self) -> bool {
        self.copied_until.is_some()
    }

    pub fn copy_button_label(&self) -> &'static str {
        if self.is_copied() {
            "✓ Copiado!"
        } else {
            "📋 Copiar Resposta"
        }
    }
}

#[derive(Debug, Default)]
pub struct ResultPresenter {
    modal: Option<ResultModal>,
    next_id: u64,
}

impl ResultPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a modal for `response`, removing any existing one first. Returns the modal id.
    pub fn present(&mut self, response: &AnalysisResponse) -> u64 {
        if let Some(old) = self.modal.take() {
            debug!(id = old.id, "previous result modal removed");
        }
        self.next_id += 1;
        let view = ResultView::build(response, Local::now());
        info!(
            id = self.next_id,
            category = %view.category,
            useful = view.useful_percent,
            priority = %view.priority,
            tags = view.tags.len(),
            "result modal opened"
        );
        self.modal = Some(ResultModal {
            id: self.next_id,
            view,
            phase: ModalPhase::Open,
            copied_until: None,
        });
        self.next_id
    }

    pub fn modal(&self) -> Option<&ResultModal> {
        self.modal.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.modal
            .as_ref()
            .is_some_and(|m| m.phase == ModalPhase::Open)
    }

    /// Start the exit transition. Returns false when nothing was open.
    pub fn close(&mut self, trigger: CloseTrigger) -> bool {
        match self.modal.as_mut() {
            Some(modal) if modal.phase == ModalPhase::Open => {
                modal.phase = ModalPhase::Closing {
                    until: Instant::now() + EXIT_TRANSITION,
                };
                info!(id = modal.id, ?trigger, "result modal closing");
                true
            }
            _ => false,
        }
    }

    /// Clicks on the modal content do not close it; clicks on the backdrop do.
    pub fn click(&mut self, on_backdrop: bool) -> bool {
        on_backdrop && self.close(CloseTrigger::Backdrop)
    }

    /// Copy the suggested reply. On failure the modal is left as it was.
    pub async fn copy_reply(&mut self, clipboard: &dyn ClipboardPort) -> Result<(), DomainError> {
        let Some(modal) = self.modal.as_mut() else {
            return Ok(());
        };
        match clipboard.write_text(&modal.view.reply).await {
            Ok(()) => {
                modal.copied_until = Some(Instant::now() + COPY_ACK);
                debug!(id = modal.id, len = modal.view.reply.len(), "reply copied");
                Ok(())
            }
            Err(e) => {
                warn!(id = modal.id, error = ?e, "clipboard write failed");
                Err(e)
            }
        }
    }

    pub fn sweep(&mut self, now: Instant) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.copied_until.is_some_and(|until| now >= until) {
            modal.copied_until = None;
        }
        if let ModalPhase::Closing { until } = modal.phase {
            if now >= until {
                debug!(id = modal.id, "result modal detached");
                self.modal = None;
            }
        }
    }
}
