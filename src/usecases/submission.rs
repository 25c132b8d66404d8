//! Submission controller. Drives one request lifecycle:
//! loading indicator → POST → parse → present or report → cleanup.
//!
//! The loading indicator is retired on every exit path.

use crate::domain::{
    AnalysisResponse, DomainError, HttpReply, SelectedInput, Severity, SubmissionState,
};
use crate::ports::AnalyzePort;
use crate::usecases::page::UiState;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const SUCCESS_MESSAGE: &str = "Análise concluída com sucesso!";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Neither text nor file; nothing was sent.
    Empty,
    /// A submission is already in flight and the guard is on; nothing was sent.
    Busy,
    Completed { modal_id: u64 },
    Failed(DomainError),
}

/// A submission that passed the precondition and is waiting on the network.
///
/// Owns everything the request needs, so sending it borrows neither the page nor
/// the controller and further events can be handled meanwhile.
pub struct Ticket {
    input: SelectedInput,
    analyzer: Arc<dyn AnalyzePort>,
}

impl Ticket {
    pub fn input(&self) -> &SelectedInput {
        &self.input
    }

    /// Perform the round trip. Hand the result to `SubmissionController::finish`.
    pub async fn send(self) -> Result<HttpReply, DomainError> {
        self.analyzer.analyze(&self.input).await
    }
}

impl std::fmt::Debug for Ticket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticket")
            .field("input", &self.input)
            .finish_non_exhaustive()
    }
}

pub struct SubmissionController {
    analyzer: Arc<dyn AnalyzePort>,
    guard_in_flight: bool,
    in_flight: usize,
}

impl SubmissionController {
    /// # Arguments
    /// * `analyzer` - Transport to the analysis endpoint (HTTP, demo, test fake)
    /// * `guard_in_flight` - Ignore submits while one is loading instead of overlapping
    pub fn new(analyzer: Arc<dyn AnalyzePort>, guard_in_flight: bool) -> Self {
        Self {
            analyzer,
            guard_in_flight,
            in_flight: 0,
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Full round trip for the current selected input.
    pub async fn submit(&mut self, ui: &mut UiState) -> SubmitOutcome {
        let ticket = match self.begin(ui) {
            Ok(ticket) => ticket,
            Err(outcome) => return outcome,
        };
        let result = ticket.send().await;
        self.finish(ui, result)
    }

    /// Check the precondition and enter Loading. `Err` carries the outcome when no
    /// request should be sent.
    pub fn begin(&mut self, ui: &mut UiState) -> Result<Ticket, SubmitOutcome> {
        match ui.submission {
            SubmissionState::Loading if self.guard_in_flight => {
                debug!(in_flight = self.in_flight, "submit ignored: request in flight");
                return Err(SubmitOutcome::Busy);
            }
            SubmissionState::Loading => {
                warn!(in_flight = self.in_flight, "overlapping submission");
            }
            SubmissionState::Completed | SubmissionState::Failed => {
                ui.submission = SubmissionState::Idle;
            }
            SubmissionState::Idle => {}
        }

        let input = ui.input.selected_input();
        if input.is_empty() {
            let e = DomainError::EmptySubmission;
            ui.notifier.notify(e.to_string(), Severity::Error);
            return Err(SubmitOutcome::Empty);
        }

        info!(
            has_text = input.text.is_some(),
            file = input.file.as_ref().map(|f| f.name.as_str()).unwrap_or("-"),
            "submitting for analysis"
        );
        ui.submission = SubmissionState::Loading;
        ui.show_loading();
        self.in_flight += 1;
        Ok(Ticket {
            input,
            analyzer: Arc::clone(&self.analyzer),
        })
    }

    /// Consume the transport result. Always hides the loading indicator.
    pub fn finish(
        &mut self,
        ui: &mut UiState,
        result: Result<HttpReply, DomainError>,
    ) -> SubmitOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);
        let outcome = match result.and_then(Self::interpret) {
            Ok(response) => {
                ui.submission = SubmissionState::Completed;
                let modal_id = ui.presenter.present(&response);
                ui.notifier.notify(SUCCESS_MESSAGE, Severity::Success);
                SubmitOutcome::Completed { modal_id }
            }
            Err(e) => {
                error!(error = %e, "analysis failed");
                ui.submission = SubmissionState::Failed;
                ui.notifier.notify(format!("Erro: {}", e), Severity::Error);
                SubmitOutcome::Failed(e)
            }
        };
        ui.hide_loading();
        outcome
    }

    /// Body is parsed as JSON whatever the status; non-2xx surfaces the `error` field.
    fn interpret(reply: HttpReply) -> Result<AnalysisResponse, DomainError> {
        info!(status = reply.status, body_len = reply.body.len(), "analysis reply");
        let body: serde_json::Value = serde_json::from_str(&reply.body)
            .map_err(|e| DomainError::Transport(e.to_string()))?;

        if !reply.is_success() {
            let message = body
                .get("error")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Erro {}", reply.status));
            return Err(DomainError::Server {
                status: reply.status,
                message,
            });
        }

        serde_json::from_value(body).map_err(|e| DomainError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateFile;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedAnalyzer {
        reply: Result<HttpReply, DomainError>,
        calls: AtomicUsize,
    }

    impl CannedAnalyzer {
        fn new(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(HttpReply {
                    status,
                    body: body.to_string(),
                }),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl AnalyzePort for CannedAnalyzer {
        async fn analyze(&self, _input: &SelectedInput) -> Result<HttpReply, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn ui_with_text(text: &str) -> UiState {
        let mut ui = UiState::default();
        ui.input.set_text(text);
        ui
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_never_calls_the_endpoint() {
        let analyzer = CannedAnalyzer::new(200, "{}");
        let mut c = SubmissionController::new(analyzer.clone(), true);
        let mut ui = ui_with_text("   ");

        assert_eq!(c.submit(&mut ui).await, SubmitOutcome::Empty);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
        let toast = ui.notifier.current().unwrap();
        assert_eq!(toast.notification.severity, Severity::Error);
        assert_eq!(
            toast.notification.message,
            "Por favor, insira o texto do email ou selecione um arquivo para análise."
        );
        assert!(ui.loading.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn file_alone_is_enough() {
        let analyzer = CannedAnalyzer::new(200, "{}");
        let mut c = SubmissionController::new(analyzer.clone(), true);
        let mut ui = UiState::default();
        ui.input
            .pick(CandidateFile::from_bytes("a.txt", b"hi".to_vec()))
            .unwrap();
        assert!(matches!(c.submit(&mut ui).await, SubmitOutcome::Completed { .. }));
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn success_opens_modal_and_notifies() {
        let analyzer = CannedAnalyzer::new(
            200,
            r#"{"is_useful": true, "analysis": {"categoria": "SPAM"}}"#,
        );
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");

        let outcome = c.submit(&mut ui).await;
        assert!(matches!(outcome, SubmitOutcome::Completed { .. }));
        assert_eq!(ui.submission, SubmissionState::Completed);
        assert!(ui.presenter.is_open());
        assert!(ui.loading.is_none());
        assert_eq!(
            ui.notifier.current().unwrap().notification.message,
            SUCCESS_MESSAGE
        );
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_uses_error_field() {
        let analyzer = CannedAnalyzer::new(500, r#"{"error": "db down"}"#);
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");

        let outcome = c.submit(&mut ui).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed(DomainError::Server {
                status: 500,
                message: "db down".into()
            })
        );
        assert_eq!(ui.submission, SubmissionState::Failed);
        assert!(ui.presenter.modal().is_none());
        assert!(ui.loading.is_none());
        assert_eq!(ui.notifier.current().unwrap().notification.message, "Erro: db down");
    }

    #[tokio::test(start_paused = true)]
    async fn server_error_without_message_uses_status() {
        let analyzer = CannedAnalyzer::new(404, "{}");
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");
        c.submit(&mut ui).await;
        assert_eq!(ui.notifier.current().unwrap().notification.message, "Erro: Erro 404");
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_json_fails_even_on_200() {
        let analyzer = CannedAnalyzer::new(200, "<html>oops</html>");
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");
        let outcome = c.submit(&mut ui).await;
        assert!(matches!(outcome, SubmitOutcome::Failed(DomainError::Transport(_))));
        assert!(ui.loading.is_none());
        assert!(ui.presenter.modal().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn transport_error_is_reported() {
        let analyzer = Arc::new(CannedAnalyzer {
            reply: Err(DomainError::Transport("connection refused".into())),
            calls: AtomicUsize::new(0),
        });
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");
        c.submit(&mut ui).await;
        assert_eq!(ui.submission, SubmissionState::Failed);
        assert_eq!(
            ui.notifier.current().unwrap().notification.message,
            "Erro: connection refused"
        );
        assert!(ui.loading.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn unreadable_file_is_reported_with_a_single_prefix() {
        let analyzer = CannedAnalyzer::new(200, "{}");
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");
        c.begin(&mut ui).unwrap();
        c.finish(&mut ui, Err(DomainError::Io("ata.txt: not found".into())));
        assert_eq!(
            ui.notifier.current().unwrap().notification.message,
            "Erro: Falha ao ler arquivo: ata.txt: not found"
        );
        assert_eq!(ui.submission, SubmissionState::Failed);
    }

    #[tokio::test(start_paused = true)]
    async fn guard_blocks_second_submit_while_loading() {
        let analyzer = CannedAnalyzer::new(200, "{}");
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");

        let ticket = c.begin(&mut ui).unwrap();
        assert_eq!(ui.submission, SubmissionState::Loading);
        assert!(ui.loading.is_some());
        assert_eq!(c.begin(&mut ui).unwrap_err(), SubmitOutcome::Busy);
        assert_eq!(c.in_flight(), 1);

        drop(ticket);
        c.finish(&mut ui, Ok(HttpReply { status: 200, body: "{}".into() }));
        assert_eq!(c.in_flight(), 0);
        assert!(ui.loading.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn without_guard_submissions_overlap_with_one_indicator() {
        let analyzer = CannedAnalyzer::new(200, "{}");
        let mut c = SubmissionController::new(analyzer, false);
        let mut ui = ui_with_text("Hello");

        c.begin(&mut ui).unwrap();
        let first_loading = ui.loading.unwrap().id;
        c.begin(&mut ui).unwrap();
        assert_eq!(c.in_flight(), 2);
        assert_ne!(ui.loading.unwrap().id, first_loading);

        let ok = || Ok(HttpReply { status: 200, body: "{}".into() });
        c.finish(&mut ui, ok());
        assert!(ui.loading.is_none());
        c.finish(&mut ui, ok());
        assert!(ui.loading.is_none());
        assert_eq!(ui.presenter.modal().unwrap().id, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn finished_state_returns_to_idle_on_next_submit() {
        let analyzer = CannedAnalyzer::new(500, "{}");
        let mut c = SubmissionController::new(analyzer, true);
        let mut ui = ui_with_text("Hello");
        c.submit(&mut ui).await;
        assert_eq!(ui.submission, SubmissionState::Failed);

        ui.input.set_text("");
        assert_eq!(c.submit(&mut ui).await, SubmitOutcome::Empty);
        assert_eq!(ui.submission, SubmissionState::Idle);
    }
}
