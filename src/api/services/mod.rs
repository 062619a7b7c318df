pub mod health;
pub mod helpers;
pub mod tracking;
pub mod types;

use actix_web::web;

pub use health::{AppStartTime, HealthService};
pub use helpers::{error_response, json_error_handler};
pub use tracking::TrackingApi;
pub use types::{ErrorResponse, HealthResponse, RecordedResponse, TrackingEventResponse};

use crate::api::constants::{MAX_JSON_PAYLOAD, TRACKING_API_PREFIX};

/// JSON 提取器配置：大小上限与统一错误格式
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_PAYLOAD)
        .error_handler(json_error_handler)
}

/// Tracking 路由配置
pub fn tracking_routes() -> actix_web::Scope {
    web::scope(TRACKING_API_PREFIX)
        .app_data(json_config())
        .route("/events", web::post().to(TrackingApi::record_event))
        .route("/events/{id}", web::get().to(TrackingApi::get_event))
        .route("/health", web::get().to(HealthService::health_check))
        .route("/health", web::head().to(HealthService::liveness_check))
}
