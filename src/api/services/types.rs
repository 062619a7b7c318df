//! 请求/响应类型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InteractionType, TrackingEvent};
use crate::errors::TrackingError;

/// POST /events 成功响应
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedResponse {
    pub tracking_event_id: String,
    pub status: String,
    pub message: String,
    pub processing_time_ms: f64,
}

/// 单条 tracking event 的 JSON 视图
#[derive(Debug, Serialize, Deserialize)]
pub struct TrackingEventResponse {
    pub tracking_event_id: String,
    pub partner_id: String,
    pub campaign_id: String,
    pub visitor_id: String,
    pub interaction_type: InteractionType,
    pub source_url: String,
    pub destination_url: String,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&TrackingEvent> for TrackingEventResponse {
    fn from(event: &TrackingEvent) -> Self {
        Self {
            tracking_event_id: event.id().to_string(),
            partner_id: event.partner_id().to_string(),
            campaign_id: event.campaign_id().to_string(),
            visitor_id: event.visitor_id().to_string(),
            interaction_type: event.interaction_type(),
            source_url: event.source_url().to_string(),
            destination_url: event.destination_url().to_string(),
            recorded_at: event.recorded_at(),
            created_at: event.created_at(),
            updated_at: event.updated_at(),
        }
    }
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uptime: u64,
    pub timestamp: String,
}

/// 错误响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error_type: String,
    pub message: String,
}

impl From<&TrackingError> for ErrorResponse {
    fn from(err: &TrackingError) -> Self {
        Self {
            code: err.code().to_string(),
            error_type: err.error_type().to_string(),
            message: err.message().to_string(),
        }
    }
}
