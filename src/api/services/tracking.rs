//! Tracking event endpoints

use actix_web::{HttpResponse, Responder, web};
use std::sync::Arc;
use std::time::Instant;
use tracing::trace;
use uuid::Uuid;

use crate::api::constants::STATUS_RECORDED;
use crate::errors::TrackingError;
use crate::services::{RecordTrackingEvent, TrackingService};

use super::helpers::error_response;
use super::types::{RecordedResponse, TrackingEventResponse};

pub struct TrackingApi;

impl TrackingApi {
    /// POST /events
    pub async fn record_event(
        service: web::Data<Arc<TrackingService>>,
        payload: web::Json<RecordTrackingEvent>,
    ) -> impl Responder {
        let start_time = Instant::now();
        trace!("Received tracking event for partner {}", payload.partner_id);

        match service.record(payload.into_inner()).await {
            Ok(event) => HttpResponse::Created().json(RecordedResponse {
                tracking_event_id: event.id().to_string(),
                status: STATUS_RECORDED.to_string(),
                message: "Tracking event recorded successfully".to_string(),
                processing_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
            }),
            Err(e) => error_response(&e),
        }
    }

    /// GET /events/{id}
    pub async fn get_event(
        service: web::Data<Arc<TrackingService>>,
        path: web::Path<String>,
    ) -> impl Responder {
        let raw_id = path.into_inner();
        let id = match Uuid::parse_str(&raw_id) {
            Ok(id) => id,
            Err(_) => {
                return error_response(&TrackingError::validation(format!(
                    "tracking_event_id: '{}' is not a valid UUID",
                    raw_id
                )));
            }
        };

        match service.get(id).await {
            Ok(event) => HttpResponse::Ok().json(TrackingEventResponse::from(&event)),
            Err(e) => error_response(&e),
        }
    }
}
