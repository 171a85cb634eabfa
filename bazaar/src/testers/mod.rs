//! Per-resource testers: each turns a console command into one backend call
//! and decides how the result is announced.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod shops;
pub mod users;

use crate::notifications::Notification;
use bazaar_api::Envelope;

pub use cart::CartState;

/// What a tester produced: the raw envelope (absent when input was rejected
/// before sending), a notification, and optional summary lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub envelope: Option<Envelope>,
    pub notification: Option<Notification>,
    pub details: Vec<String>,
}

impl Outcome {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            envelope: Some(envelope),
            notification: None,
            details: Vec::new(),
        }
    }

    /// Input rejected locally; nothing was sent.
    pub fn rejected(notification: Notification) -> Self {
        Self {
            envelope: None,
            notification: Some(notification),
            details: Vec::new(),
        }
    }

    pub fn notify(mut self, notification: Notification) -> Self {
        self.notification = Some(notification);
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn is_success(&self) -> bool {
        self.envelope.as_ref().is_some_and(Envelope::is_success)
    }
}

/// Pick the success or failure notification from the envelope.
fn announce(envelope: Envelope, success: Notification, failure: Notification) -> Outcome {
    let notification = if envelope.is_success() {
        success
    } else {
        failure
    };
    Outcome::new(envelope).notify(notification)
}
