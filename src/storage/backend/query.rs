//! Read-only operations for SeaOrmStorage

use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};
use uuid::Uuid;

use super::SeaOrmStorage;
use super::converters::model_to_tracking_event;
use crate::domain::TrackingEvent;
use crate::errors::{Result, TrackingError};

use migration::entities::tracking_event;

impl SeaOrmStorage {
    pub async fn get(&self, id: Uuid) -> Result<Option<TrackingEvent>> {
        let model = tracking_event::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| {
                TrackingError::database_operation(format!(
                    "Failed to load tracking event '{}': {}",
                    id, e
                ))
            })?;

        model.map(model_to_tracking_event).transpose()
    }

    pub async fn count(&self) -> Result<u64> {
        tracking_event::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| {
                TrackingError::database_operation(format!("Failed to count tracking events: {}", e))
            })
    }

    /// 最近创建的事件，按 created_at 倒序
    pub async fn recent(&self, limit: u64) -> Result<Vec<TrackingEvent>> {
        tracking_event::Entity::find()
            .order_by_desc(tracking_event::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(|e| {
                TrackingError::database_operation(format!(
                    "Failed to load recent tracking events: {}",
                    e
                ))
            })?
            .into_iter()
            .map(model_to_tracking_event)
            .collect()
    }
}
