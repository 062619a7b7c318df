//! Attribution handler
//!
//! Placeholder for marketing attribution. It only records that it saw the
//! event; attribution models plug in here later.

use tracing::info;

use crate::errors::TrackingError;
use crate::events::publisher::EventHandler;
use crate::events::{Event, HandlerResult};

#[derive(Debug, Default, Clone)]
pub struct AttributionHandler;

impl AttributionHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EventHandler for AttributionHandler {
    async fn handle(&self, event: &Event) -> HandlerResult {
        let payload = event.as_tracking_event_recorded().ok_or_else(|| {
            TrackingError::event_handler(format!(
                "attribution cannot handle event type '{}'",
                event.event_type
            ))
        })?;

        info!(
            tracking_event_id = %payload.tracking_event_id,
            partner_id = %payload.partner_id,
            campaign_id = %payload.campaign_id,
            visitor_id = %payload.visitor_id,
            interaction_type = %payload.interaction_type,
            "Attribution handler invoked"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "attribution"
    }
}
