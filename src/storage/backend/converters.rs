use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::domain::{InteractionType, TrackingEvent};
use crate::errors::{Result, TrackingError};
use migration::entities::tracking_event;

/// 将 Sea-ORM Model 转换为 TrackingEvent
///
/// Fails only if the row holds an id or interaction type this service would
/// never have written.
pub fn model_to_tracking_event(model: tracking_event::Model) -> Result<TrackingEvent> {
    let id = Uuid::parse_str(&model.tracking_event_id).map_err(|e| {
        TrackingError::serialization(format!(
            "Stored tracking_event_id '{}' is not a UUID: {}",
            model.tracking_event_id, e
        ))
    })?;
    let interaction_type = InteractionType::parse(&model.interaction_type)
        .map_err(|e| TrackingError::serialization(e.message().to_string()))?;

    Ok(TrackingEvent::restore(
        id,
        model.partner_id,
        model.campaign_id,
        model.visitor_id,
        interaction_type,
        model.source_url,
        model.destination_url,
        model.recorded_at,
        model.created_at,
        model.updated_at,
    ))
}

/// 将 TrackingEvent 转换为 ActiveModel（用于插入）
pub fn tracking_event_to_active_model(event: &TrackingEvent) -> tracking_event::ActiveModel {
    tracking_event::ActiveModel {
        tracking_event_id: Set(event.id().to_string()),
        partner_id: Set(event.partner_id().to_string()),
        campaign_id: Set(event.campaign_id().to_string()),
        visitor_id: Set(event.visitor_id().to_string()),
        interaction_type: Set(event.interaction_type().as_str().to_string()),
        source_url: Set(event.source_url().to_string()),
        destination_url: Set(event.destination_url().to_string()),
        recorded_at: Set(event.recorded_at()),
        created_at: Set(event.created_at()),
        updated_at: Set(event.updated_at()),
    }
}
