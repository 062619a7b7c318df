use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{InteractionType, TrackingEvent};

/// 事件类型标签
pub mod event_types {
    /// A tracking event row has been persisted
    pub const TRACKING_EVENT_RECORDED: &str = "tracking_event.recorded";
}

/// A fact the domain announces after it happened.
///
/// Each implementor names its type tag (the key handlers are registered
/// under) and knows how to wrap itself into an [`EventPayload`].
pub trait DomainEvent: Serialize + Send + Sync {
    fn event_type(&self) -> &'static str;

    fn into_payload(self) -> EventPayload;
}

/// 事件数据结构
#[derive(Debug, Clone, Serialize)]
pub struct Event {
    /// 事件唯一标识符
    pub id: Uuid,
    /// 事件类型标签，用于查找处理器
    pub event_type: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: EventPayload,
    /// 事件来源
    pub source: String,
}

/// 事件负载数据
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    TrackingEventRecorded(TrackingEventRecorded),
}

/// Payload of `tracking_event.recorded`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEventRecorded {
    pub tracking_event_id: Uuid,
    pub partner_id: String,
    pub campaign_id: String,
    pub visitor_id: String,
    pub interaction_type: InteractionType,
    pub source_url: String,
    pub destination_url: String,
    pub recorded_at: DateTime<Utc>,
}

impl From<&TrackingEvent> for TrackingEventRecorded {
    fn from(event: &TrackingEvent) -> Self {
        Self {
            tracking_event_id: event.id(),
            partner_id: event.partner_id().to_string(),
            campaign_id: event.campaign_id().to_string(),
            visitor_id: event.visitor_id().to_string(),
            interaction_type: event.interaction_type(),
            source_url: event.source_url().to_string(),
            destination_url: event.destination_url().to_string(),
            recorded_at: event.recorded_at(),
        }
    }
}

impl DomainEvent for TrackingEventRecorded {
    fn event_type(&self) -> &'static str {
        event_types::TRACKING_EVENT_RECORDED
    }

    fn into_payload(self) -> EventPayload {
        EventPayload::TrackingEventRecorded(self)
    }
}

impl Event {
    /// Wrap a domain event into an envelope stamped with a fresh id and time
    pub fn new<E: DomainEvent>(domain_event: E, source: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: domain_event.event_type(),
            occurred_at: Utc::now(),
            payload: domain_event.into_payload(),
            source: source.to_string(),
        }
    }

    /// 创建 tracking_event.recorded 事件
    pub fn tracking_event_recorded(event: &TrackingEvent, source: &str) -> Self {
        Self::new(TrackingEventRecorded::from(event), source)
    }

    pub fn as_tracking_event_recorded(&self) -> Option<&TrackingEventRecorded> {
        match &self.payload {
            EventPayload::TrackingEventRecorded(payload) => Some(payload),
        }
    }
}
