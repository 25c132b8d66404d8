//! The analysis page. Owns the UI-state object (one named slot per singleton
//! element) and maps each user event onto exactly one handler.

use crate::domain::{CandidateFile, DomainError, HttpReply, Severity, SubmissionState};
use crate::ports::{AnalyzePort, ClipboardPort};
use crate::usecases::input_acquisition::{DragKind, InputAcquisition, ZoneAction, ZoneTarget};
use crate::usecases::notifier::{NOTIFICATION_TTL, Notifier};
use crate::usecases::presenter::{CloseTrigger, ResultPresenter};
use crate::usecases::submission::{SubmissionController, SubmitOutcome, Ticket};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

pub const RESET_MESSAGE: &str = "Formulário limpo. Pronto para nova análise!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingIndicator {
    pub id: u64,
    pub since: Instant,
}

/// Page state. Every singleton element is a slot replaced, never stacked.
#[derive(Debug)]
pub struct UiState {
    pub notifier: Notifier,
    pub input: InputAcquisition,
    pub presenter: ResultPresenter,
    pub loading: Option<LoadingIndicator>,
    pub submission: SubmissionState,
    next_loading_id: u64,
}

impl UiState {
    pub fn new(notification_ttl: Duration) -> Self {
        Self {
            notifier: Notifier::new(notification_ttl),
            input: InputAcquisition::new(),
            presenter: ResultPresenter::new(),
            loading: None,
            submission: SubmissionState::Idle,
            next_loading_id: 0,
        }
    }

    pub fn show_loading(&mut self) {
        self.hide_loading();
        self.next_loading_id += 1;
        self.loading = Some(LoadingIndicator {
            id: self.next_loading_id,
            since: Instant::now(),
        });
    }

    pub fn hide_loading(&mut self) {
        if let Some(indicator) = self.loading.take() {
            debug!(
                id = indicator.id,
                elapsed_ms = indicator.since.elapsed().as_millis() as u64,
                "loading indicator removed"
            );
        }
    }

    /// Advance every timer-driven slot.
    pub fn sweep(&mut self, now: Instant) {
        self.notifier.sweep(now);
        self.input.sweep(now);
        self.presenter.sweep(now);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}

/// Host elements the page binds to. Ids are opaque to the core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageElements {
    pub form: Option<String>,
    pub text_input: Option<String>,
    pub submit_trigger: Option<String>,
    pub drop_zone: Option<String>,
}

impl PageElements {
    pub fn standard() -> Self {
        Self {
            form: Some("form".into()),
            text_input: Some("text".into()),
            submit_trigger: Some("button".into()),
            drop_zone: Some("Pdf_container".into()),
        }
    }

    fn check(&self) -> Result<(), DomainError> {
        let required = [
            ("form", &self.form),
            ("text_input", &self.text_input),
            ("submit_trigger", &self.submit_trigger),
            ("drop_zone", &self.drop_zone),
        ];
        for (name, id) in required {
            if id.is_none() {
                return Err(DomainError::MissingElement(name));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub notification_ttl: Duration,
    pub guard_in_flight: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            notification_ttl: NOTIFICATION_TTL,
            guard_in_flight: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Char(char),
}

/// User events delivered by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TextInput(String),
    ZoneHover(bool),
    ZoneClick(ZoneTarget),
    FilePicked(CandidateFile),
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<CandidateFile>),
    SubmitClicked,
    FormSubmitted,
    ModalCloseClicked,
    ModalClicked { on_backdrop: bool },
    KeyDown(Key),
    CopyReplyClicked,
    NewAnalysisClicked,
}

/// What the host must do with the native event or the page chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    PreventDefault,
    StopPropagation,
    OpenFilePicker,
    FocusTextInput,
}

pub struct Page {
    ui: UiState,
    controller: SubmissionController,
    clipboard: Arc<dyn ClipboardPort>,
}

impl Page {
    /// Bind to the host elements. A missing element aborts setup.
    pub fn mount(
        elements: &PageElements,
        analyzer: Arc<dyn AnalyzePort>,
        clipboard: Arc<dyn ClipboardPort>,
        settings: PageSettings,
    ) -> Result<Self, DomainError> {
        if let Err(e) = elements.check() {
            error!(error = %e, "page setup aborted");
            return Err(e);
        }
        info!(
            guard_in_flight = settings.guard_in_flight,
            notification_ms = settings.notification_ttl.as_millis() as u64,
            "analysis page ready"
        );
        Ok(Self {
            ui: UiState::new(settings.notification_ttl),
            controller: SubmissionController::new(analyzer, settings.guard_in_flight),
            clipboard,
        })
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn in_flight(&self) -> usize {
        self.controller.in_flight()
    }

    /// Retire expired toasts, flashes and closing modals.
    pub fn tick(&mut self) {
        self.ui.sweep(Instant::now());
    }

    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.ui.notifier.notify(message, severity);
    }

    pub async fn dispatch(&mut self, event: UiEvent) -> Vec<Effect> {
        match event {
            UiEvent::TextInput(value) => {
                self.ui.input.set_text(value);
                vec![]
            }
            UiEvent::ZoneHover(inside) => {
                self.ui.input.hover(inside);
                vec![]
            }
            UiEvent::ZoneClick(target) => match self.ui.input.click_zone(target) {
                ZoneAction::OpenPicker => vec![Effect::OpenFilePicker],
                ZoneAction::FileRemoved => vec![Effect::StopPropagation],
            },
            UiEvent::FilePicked(file) => {
                let result = self.ui.input.pick(file);
                self.report(result);
                vec![]
            }
            UiEvent::DragEnter => self.drag(DragKind::Enter),
            UiEvent::DragOver => self.drag(DragKind::Over),
            UiEvent::DragLeave => self.drag(DragKind::Leave),
            UiEvent::Drop(files) => {
                let result = self.ui.input.drop_files(files).map(|_| ());
                self.report(result);
                vec![Effect::PreventDefault, Effect::StopPropagation]
            }
            UiEvent::SubmitClicked | UiEvent::FormSubmitted => {
                self.submit().await;
                vec![Effect::PreventDefault]
            }
            UiEvent::ModalCloseClicked => {
                self.ui.presenter.close(CloseTrigger::Button);
                vec![]
            }
            UiEvent::ModalClicked { on_backdrop } => {
                self.ui.presenter.click(on_backdrop);
                vec![]
            }
            UiEvent::KeyDown(Key::Escape) => {
                self.ui.presenter.close(CloseTrigger::Escape);
                vec![]
            }
            UiEvent::KeyDown(_) => vec![],
            UiEvent::CopyReplyClicked => {
                let result = self.ui.presenter.copy_reply(self.clipboard.as_ref()).await;
                self.report(result);
                vec![]
            }
            UiEvent::NewAnalysisClicked => self.new_analysis(),
        }
    }

    /// Submit and wait for the reply. The page stays borrowed for the round trip.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.controller.submit(&mut self.ui).await
    }

    /// First half of a submission: precondition, Loading, loading indicator.
    ///
    /// The returned ticket is sent without borrowing the page, so events (including
    /// another submit) can be dispatched while the request is in flight. With the
    /// in-flight guard on, a second submit meanwhile yields `SubmitOutcome::Busy`.
    pub fn begin_submit(&mut self) -> Result<Ticket, SubmitOutcome> {
        self.controller.begin(&mut self.ui)
    }

    /// Second half of a submission: present or report, hide the loading indicator.
    pub fn finish_submit(&mut self, result: Result<HttpReply, DomainError>) -> SubmitOutcome {
        self.controller.finish(&mut self.ui, result)
    }

    fn drag(&mut self, kind: DragKind) -> Vec<Effect> {
        self.ui.input.drag(kind);
        vec![Effect::PreventDefault, Effect::StopPropagation]
    }

    fn new_analysis(&mut self) -> Vec<Effect> {
        self.ui.presenter.close(CloseTrigger::NewAnalysis);
        self.ui.input.reset();
        self.ui.submission = SubmissionState::Idle;
        info!("form reset for new analysis");
        self.ui.notifier.notify(RESET_MESSAGE, Severity::Success);
        vec![Effect::FocusTextInput]
    }

    fn report(&mut self, result: Result<(), DomainError>) {
        if let Err(e) = result {
            self.ui.notifier.notify(e.to_string(), Severity::Error);
        }
    }
}
