//! Write operations for SeaOrmStorage

use sea_orm::EntityTrait;
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::tracking_event_to_active_model;
use crate::domain::TrackingEvent;
use crate::errors::{Result, TrackingError};

use migration::entities::tracking_event;

impl SeaOrmStorage {
    /// Insert one tracking event row. There is no upsert: ids are fresh
    /// UUIDs, so a conflict means something is badly wrong.
    pub async fn insert(&self, event: &TrackingEvent) -> Result<()> {
        tracking_event::Entity::insert(tracking_event_to_active_model(event))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| {
                TrackingError::database_operation(format!(
                    "Failed to insert tracking event '{}': {}",
                    event.id(),
                    e
                ))
            })?;

        debug!("Tracking event inserted: {}", event.id());
        Ok(())
    }
}
