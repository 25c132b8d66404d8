//! Analysis transport adapters. Implement AnalyzePort.
//!
//! reqwest multipart client for the real endpoint and an offline demo analyzer.

pub mod analyze_client;
pub mod demo_adapter;

pub use analyze_client::AnalyzeClient;
pub use demo_adapter::DemoAnalyzer;
