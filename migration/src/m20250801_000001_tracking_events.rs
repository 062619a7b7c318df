//! 创建 tracking_events 表
//!
//! 每一行对应一次营销互动（click / view / engagement）。

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TrackingEvents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TrackingEvents::TrackingEventId)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::PartnerId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::CampaignId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::VisitorId)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::InteractionType)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(TrackingEvents::SourceUrl).text().not_null())
                    .col(
                        ColumnDef::new(TrackingEvents::DestinationUrl)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TrackingEvents::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 按创建时间倒序查看最近事件
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tracking_events_created_at")
                    .table(TrackingEvents::Table)
                    .col(TrackingEvents::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_tracking_events_partner_campaign")
                    .table(TrackingEvents::Table)
                    .col(TrackingEvents::PartnerId)
                    .col(TrackingEvents::CampaignId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_tracking_events_partner_campaign")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(Index::drop().name("idx_tracking_events_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TrackingEvents::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TrackingEvents {
    #[sea_orm(iden = "tracking_events")]
    Table,
    TrackingEventId,
    PartnerId,
    CampaignId,
    VisitorId,
    InteractionType,
    SourceUrl,
    DestinationUrl,
    RecordedAt,
    CreatedAt,
    UpdatedAt,
}
