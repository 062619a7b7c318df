use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use tracing::{debug, error, trace};

use super::event::Event;
use super::handlers::HandlerResult;

/// 事件处理器特征
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &Event) -> HandlerResult;

    /// 获取处理器名称（用于日志）
    fn name(&self) -> &str;
}

/// Result of one publish call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub invoked: usize,
    pub failed: usize,
}

/// Synchronous in-process publisher.
///
/// Handlers are registered while the publisher is still owned mutably during
/// startup; afterwards it is shared behind an `Arc` and the registry no
/// longer changes.
#[derive(Default)]
pub struct EventPublisher {
    handlers: HashMap<String, Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册事件处理器，按注册顺序调用
    pub fn register(&mut self, event_type: &str, handler: Arc<dyn EventHandler>) {
        debug!(
            "Registering event handler '{}' for '{}'",
            handler.name(),
            event_type
        );
        self.handlers
            .entry(event_type.to_string())
            .or_default()
            .push(handler);
    }

    /// Number of handlers registered for an event type
    pub fn handler_count(&self, event_type: &str) -> usize {
        self.handlers.get(event_type).map_or(0, Vec::len)
    }

    /// Invoke every handler registered for the event's type, one after
    /// another. A failing handler is logged and skipped; publishing itself
    /// never fails.
    ///
    /// A panicking handler is caught and counted as failed only when the
    /// build unwinds. The release profile sets `panic = "abort"`, so there a
    /// handler panic still terminates the process (after the row has been
    /// committed).
    pub async fn publish(&self, event: &Event) -> PublishOutcome {
        let mut outcome = PublishOutcome::default();

        let Some(handlers) = self.handlers.get(event.event_type) else {
            trace!("No handlers registered for '{}'", event.event_type);
            return outcome;
        };

        for handler in handlers {
            outcome.invoked += 1;
            match AssertUnwindSafe(handler.handle(event)).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    outcome.failed += 1;
                    error!(
                        event_id = %event.id,
                        event_type = event.event_type,
                        "Event handler '{}' failed: {}",
                        handler.name(),
                        e
                    );
                }
                Err(_) => {
                    outcome.failed += 1;
                    error!(
                        event_id = %event.id,
                        event_type = event.event_type,
                        "Event handler '{}' panicked",
                        handler.name()
                    );
                }
            }
        }

        outcome
    }
}
