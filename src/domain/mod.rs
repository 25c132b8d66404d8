//! Core domain layer. No external I/O dependencies beyond reading candidate files.
//!
//! Entities, the file Validator and the error taxonomy live here.

pub mod entities;
pub mod errors;
pub mod validator;

pub use entities::{
    ACCEPTED_EXTENSIONS, AnalysisResponse, CandidateFile, FileSource, HttpReply, MAX_FILE_BYTES,
    RawAnalysis, Rgb, SelectedInput, Severity, SubmissionState, UiNotification, ValidationReason,
    ValidationVerdict,
};
pub use errors::DomainError;
pub use validator::validate;
