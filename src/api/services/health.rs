use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use tracing::trace;

use crate::services::{StorageHealth, TrackingService};

use super::types::HealthResponse;

// 应用启动时间结构体
#[derive(Clone, Debug)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

impl AppStartTime {
    pub fn now() -> Self {
        Self {
            start_datetime: chrono::Utc::now(),
        }
    }

    /// 运行秒数
    pub fn uptime_seconds(&self, now: chrono::DateTime<chrono::Utc>) -> u64 {
        (now - self.start_datetime).num_seconds().max(0) as u64
    }
}

/// Health Service
///
/// `GET` is the readiness check: ping plus a row count, so a missing table
/// reports unhealthy. `HEAD` is the liveness check and only pings the
/// connection, which keeps frequent probes off the table.
pub struct HealthService;

impl HealthService {
    pub async fn health_check(
        service: web::Data<Arc<TrackingService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received health check request");
        Self::respond(service.health().await, &app_start_time)
    }

    pub async fn liveness_check(
        service: web::Data<Arc<TrackingService>>,
        app_start_time: web::Data<AppStartTime>,
    ) -> impl Responder {
        trace!("Received liveness check request");
        Self::respond(service.liveness().await, &app_start_time)
    }

    fn respond(health: StorageHealth, app_start_time: &AppStartTime) -> HttpResponse {
        let body = HealthResponse {
            status: if health.reachable {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            database: if health.reachable {
                "connected".to_string()
            } else {
                "disconnected".to_string()
            },
            backend: health.backend,
            events_count: health.events_count,
            error: health.error,
            uptime: app_start_time.uptime_seconds(health.checked_at),
            timestamp: health.checked_at.to_rfc3339(),
        };

        if health.reachable {
            HttpResponse::Ok().json(body)
        } else {
            HttpResponse::ServiceUnavailable().json(body)
        }
    }
}
