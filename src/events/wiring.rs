use std::sync::Arc;

use tracing::debug;

use super::event_types;
use super::handlers::AttributionHandler;
use super::publisher::EventPublisher;

/// Build the publisher with every handler this service ships with.
///
/// Called once at startup; the returned publisher is read-only afterwards.
pub fn build_publisher() -> Arc<EventPublisher> {
    let mut publisher = EventPublisher::new();

    publisher.register(
        event_types::TRACKING_EVENT_RECORDED,
        Arc::new(AttributionHandler::new()),
    );

    debug!(
        "Event publisher ready: {} handler(s) for '{}'",
        publisher.handler_count(event_types::TRACKING_EVENT_RECORDED),
        event_types::TRACKING_EVENT_RECORDED
    );

    Arc::new(publisher)
}
