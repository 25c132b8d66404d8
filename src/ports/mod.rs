//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by the front-end into the application
//! - Outbound: Called by the application into infrastructure (HTTP, clipboard)

pub mod inbound;
pub mod outbound;

pub use inbound::InputPort;
pub use outbound::{AnalyzePort, ClipboardPort};
