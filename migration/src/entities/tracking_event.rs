//! Tracking event entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "tracking_events")]
pub struct Model {
    /// UUID in its hyphenated string form
    #[sea_orm(primary_key, auto_increment = false)]
    pub tracking_event_id: String,
    pub partner_id: String,
    pub campaign_id: String,
    pub visitor_id: String,
    /// One of `click`, `view`, `engagement`
    pub interaction_type: String,
    #[sea_orm(column_type = "Text")]
    pub source_url: String,
    #[sea_orm(column_type = "Text")]
    pub destination_url: String,
    pub recorded_at: DateTimeUtc,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
