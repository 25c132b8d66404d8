//! Application use cases. Page state and its components, driven through ports.

pub mod input_acquisition;
pub mod notifier;
pub mod page;
pub mod presenter;
pub mod submission;

pub use input_acquisition::{InputAcquisition, ZoneTarget};
pub use notifier::Notifier;
pub use page::{Effect, Key, Page, PageElements, PageSettings, UiEvent, UiState};
pub use presenter::{ResultPresenter, ResultView};
pub use submission::{SubmissionController, SubmitOutcome, Ticket};
