//! Debug hooks for following the decisions made during a search.
//!
//! Handlers only observe. Turning debugging on or off must never change
//! which paths are found.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::pareto::ParetoSetEventListener;

/// Receives accept, reject and drop events for one kind of search element.
pub trait DebugHandler<T>: Send + Sync {
    /// `element` was accepted.
    fn accept(&self, element: &T);

    /// `element` was rejected, optionally because of `rejected_by`.
    fn reject(&self, element: &T, rejected_by: Option<&T>, reason: &str);

    /// A previously accepted `element` was dropped, optionally in favour of
    /// `dropped_by`.
    fn dropped(&self, element: &T, dropped_by: Option<&T>, reason: &str);
}

/// Debug handler that writes every event to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingDebugHandler;

impl<T: fmt::Display> DebugHandler<T> for LoggingDebugHandler {
    fn accept(&self, element: &T) {
        debug!(element = %element, "accept");
    }

    fn reject(&self, element: &T, rejected_by: Option<&T>, reason: &str) {
        match rejected_by {
            Some(by) => debug!(element = %element, rejected_by = %by, reason, "reject"),
            None => debug!(element = %element, reason, "reject"),
        }
    }

    fn dropped(&self, element: &T, dropped_by: Option<&T>, reason: &str) {
        match dropped_by {
            Some(by) => debug!(element = %element, dropped_by = %by, reason, "drop"),
            None => debug!(element = %element, reason, "drop"),
        }
    }
}

/// Forwards pareto set events to a [`DebugHandler`].
pub struct DebugListener<T> {
    handler: Arc<dyn DebugHandler<T>>,
}

impl<T> DebugListener<T> {
    pub fn new(handler: Arc<dyn DebugHandler<T>>) -> Self {
        Self { handler }
    }
}

impl<T> ParetoSetEventListener<T> for DebugListener<T> {
    fn notify_element_accepted(&self, element: &T) {
        self.handler.accept(element);
    }

    fn notify_element_dropped(&self, element: &T, dropped_by: &T) {
        self.handler
            .dropped(element, Some(dropped_by), "Dominated by a new element");
    }

    fn notify_element_rejected(&self, element: &T, rejected_by: &T) {
        self.handler
            .reject(element, Some(rejected_by), "Dominated by an existing element");
    }
}
