//! Transient toast notifications. One slot, last write wins.
//!
//! A toast is visible for `ttl`, then plays a short exit transition, then is detached.

use crate::domain::{Severity, UiNotification};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default time a toast stays fully visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

/// Length of every exit transition (toast slide-out, modal fade-out).
pub const EXIT_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Visible { until: Instant },
    Exiting { until: Instant },
}

/// The toast currently attached to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notification: UiNotification,
    pub phase: ToastPhase,
}

impl Toast {
    pub fn is_exiting(&self) -> bool {
        matches!(self.phase, ToastPhase::Exiting { .. })
    }
}

#[derive(Debug)]
pub struct Notifier {
    ttl: Duration,
    slot: Option<Toast>,
    next_id: u64,
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: None,
            next_id: 1,
        }
    }

    /// Replace any displayed toast with a new one. Returns the new toast id.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> u64 {
        let message = message.into();
        if let Some(old) = self.slot.take() {
            debug!(id = old.id, "toast preempted");
        }
        let id = self.next_id;
        self.next_id += 1;
        debug!(id, ?severity, %message, "toast shown");
        self.slot = Some(Toast {
            id,
            notification: UiNotification { message, severity },
            phase: ToastPhase::Visible {
                until: Instant::now() + self.ttl,
            },
        });
        id
    }

    pub fn current(&self) -> Option<&Toast> {
        self.slot.as_ref()
    }

    /// Advance timers: start the exit transition or detach.
    pub fn sweep(&mut self, now: Instant) {
        let Some(toast) = self.slot.as_mut() else {
            return;
        };
        match toast.phase {
            ToastPhase::Visible { until } if now >= until => {
                toast.phase = ToastPhase::Exiting {
                    until: until + EXIT_TRANSITION,
                };
                if now >= until + EXIT_TRANSITION {
                    self.slot = None;
                }
            }
            ToastPhase::Exiting { until } if now >= until => self.slot = None,
            _ => {}
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_TTL)
    }
}
