//! Infrastructure adapters. Implement outbound ports and the inbound front-end.
//!
//! HTTP analysis endpoint, terminal clipboard, terminal UI. Map errors to DomainError.

pub mod clipboard;
pub mod http;
pub mod ui;
