use std::sync::{Arc, Mutex};

use tracing::error;

/// Region whose markup is replaced wholesale by each successful render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayRegion {
    markup: String,
}

impl DisplayRegion {
    #[must_use]
    pub fn markup(&self) -> &str {
        &self.markup
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markup.is_empty()
    }

    pub fn replace(&mut self, markup: String) {
        self.markup = markup;
    }
}

/// Sink for user-facing error messages.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Default notifier: reports through `tracing` at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, message: &str) {
        error!(error = message, "chart submission failed");
    }
}

/// Notifier that keeps every message; clones share the same log.
#[derive(Debug, Default, Clone)]
pub struct CollectingNotifier {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CollectingNotifier {
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

impl Notifier for CollectingNotifier {
    fn notify(&mut self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_owned());
        }
    }
}
