//! email-triage: submit email text or PDF/TXT files for analysis and present the
//! triage result, with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
