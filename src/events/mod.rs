//! In-process domain events
//!
//! A tracking event is published once it has been persisted. Handlers are
//! registered against event-type strings at startup and invoked
//! synchronously, in registration order, on the request path.

pub mod event;
pub mod handlers;
pub mod publisher;
pub mod wiring;

pub use event::{DomainEvent, Event, EventPayload, TrackingEventRecorded, event_types};
pub use handlers::{AttributionHandler, HandlerResult};
pub use publisher::{EventHandler, EventPublisher, PublishOutcome};
pub use wiring::build_publisher;
