//! Tracking service
//!
//! Application-level entry point for recording interactions: validate,
//! persist, then publish. Shared by the HTTP handlers and the CLI.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::{InteractionType, NewTrackingEvent, TrackingEvent};
use crate::errors::{Result, TrackingError};
use crate::events::{Event, EventPublisher};
use crate::storage::SeaOrmStorage;

/// 健康检查超时
const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// 事件来源标识
const EVENT_SOURCE: &str = "tracking_service";

/// Request to record one tracking event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordTrackingEvent {
    pub partner_id: String,
    pub campaign_id: String,
    pub visitor_id: String,
    pub interaction_type: InteractionType,
    pub source_url: String,
    pub destination_url: String,
}

impl From<RecordTrackingEvent> for NewTrackingEvent {
    fn from(req: RecordTrackingEvent) -> Self {
        Self {
            partner_id: req.partner_id,
            campaign_id: req.campaign_id,
            visitor_id: req.visitor_id,
            interaction_type: req.interaction_type,
            source_url: req.source_url,
            destination_url: req.destination_url,
        }
    }
}

/// Storage status reported by [`TrackingService::health`]
#[derive(Debug, Clone)]
pub struct StorageHealth {
    pub reachable: bool,
    pub backend: String,
    pub events_count: Option<u64>,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

pub struct TrackingService {
    storage: Arc<SeaOrmStorage>,
    publisher: Arc<EventPublisher>,
}

impl TrackingService {
    pub fn new(storage: Arc<SeaOrmStorage>, publisher: Arc<EventPublisher>) -> Self {
        Self { storage, publisher }
    }

    /// Record one interaction.
    ///
    /// The row is committed before any handler runs. A persistence failure
    /// aborts without publishing; handler failures are logged by the
    /// publisher and never change the result.
    pub async fn record(&self, req: RecordTrackingEvent) -> Result<TrackingEvent> {
        let event = TrackingEvent::record(req.into())?;

        if let Err(e) = self.storage.insert(&event).await {
            error!("Failed to persist tracking event {}: {}", event.id(), e);
            return Err(e);
        }

        let outcome = self
            .publisher
            .publish(&Event::tracking_event_recorded(&event, EVENT_SOURCE))
            .await;
        if outcome.failed > 0 {
            warn!(
                "Tracking event {} stored, but {}/{} event handler(s) failed",
                event.id(),
                outcome.failed,
                outcome.invoked
            );
        } else {
            debug!(
                "Tracking event {} published to {} handler(s)",
                event.id(),
                outcome.invoked
            );
        }

        info!(
            tracking_event_id = %event.id(),
            partner_id = event.partner_id(),
            campaign_id = event.campaign_id(),
            interaction_type = %event.interaction_type(),
            "Tracking event recorded"
        );
        Ok(event)
    }

    pub async fn get(&self, id: Uuid) -> Result<TrackingEvent> {
        self.storage
            .get(id)
            .await?
            .ok_or_else(|| TrackingError::not_found(format!("Tracking event not found: {}", id)))
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<TrackingEvent>> {
        self.storage.recent(limit).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.storage.count().await
    }

    pub fn backend_name(&self) -> &str {
        self.storage.backend_name()
    }

    /// Readiness: the store answers and the table can be counted, within
    /// the health-check timeout.
    pub async fn health(&self) -> StorageHealth {
        let probe = async {
            self.storage.ping().await?;
            self.storage.count().await.map(Some)
        };
        self.check_storage(probe).await
    }

    /// Liveness: only a connection round-trip, no table scan.
    pub async fn liveness(&self) -> StorageHealth {
        let probe = async { self.storage.ping().await.map(|_| None) };
        self.check_storage(probe).await
    }

    async fn check_storage<F>(&self, probe: F) -> StorageHealth
    where
        F: std::future::Future<Output = Result<Option<u64>>>,
    {
        let backend = self.storage.backend_name().to_string();

        let (reachable, events_count, error) =
            match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, probe).await {
                Ok(Ok(count)) => (true, count, None),
                Ok(Err(e)) => {
                    error!("Storage health check failed: {}", e);
                    (false, None, Some(e.message().to_string()))
                }
                Err(_) => {
                    error!("Storage health check timeout");
                    (false, None, Some("timeout".to_string()))
                }
            };

        StorageHealth {
            reachable,
            backend,
            events_count,
            error,
            checked_at: Utc::now(),
        }
    }
}
