//! Inspect mode
//!
//! Prints what the store holds: backend, total count and the most recent
//! tracking events. When the table is empty, prints an example request
//! instead.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt::Write;
use std::sync::Arc;
use tracing::warn;

use crate::config::ServerConfig;
use crate::domain::{InteractionType, TrackingEvent};
use crate::events::EventPublisher;
use crate::services::{RecordTrackingEvent, TrackingService};
use crate::storage::StorageFactory;

const SEPARATOR_WIDTH: usize = 100;

/// Print a summary of the configured store to stdout
pub async fn run_inspect(limit: u64) -> Result<()> {
    let config = crate::config::get_config();

    let storage = StorageFactory::create()
        .await
        .context("Failed to open storage")?;

    // 只读模式，不发布事件
    let service = TrackingService::new(storage.clone(), Arc::new(EventPublisher::new()));
    let report = inspect_report(&service, &config.server, limit).await;
    drop(service);

    if let Ok(storage) = Arc::try_unwrap(storage)
        && let Err(e) = storage.close().await
    {
        warn!("{}", e);
    }

    print!("{}", report?);
    Ok(())
}

/// Build the inspect output: backend, total count, then either the latest
/// `limit` events or an example request when the store is empty.
pub async fn inspect_report(
    service: &TrackingService,
    server: &ServerConfig,
    limit: u64,
) -> Result<String> {
    let count = service
        .count()
        .await
        .context("Failed to count tracking events")?;

    let mut out = String::new();
    writeln!(out, "{} {}", "Backend:".bold(), service.backend_name().cyan())?;
    writeln!(out, "{} {}", "Total tracking events:".bold(), count.to_string().green())?;

    if count == 0 {
        writeln!(out)?;
        writeln!(
            out,
            "{} No tracking events found. Try sending a POST request to:",
            "ℹ".blue()
        )?;
        writeln!(
            out,
            "   http://{}:{}/api/v1/tracking/events",
            display_host(&server.host),
            server.port
        )?;
        writeln!(out, "\n   Example payload:")?;
        writeln!(out, "{}", serde_json::to_string_pretty(&example_payload())?)?;
    } else {
        let events = service
            .recent(limit)
            .await
            .context("Failed to load recent tracking events")?;
        writeln!(out)?;
        writeln!(out, "{} Last {} tracking event(s):", "🔍".bold(), events.len())?;
        writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        for event in &events {
            writeln!(out, "{}", format_event(event))?;
            writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))?;
        }
    }

    Ok(out)
}

/// 单条事件的多行文本
pub fn format_event(event: &TrackingEvent) -> String {
    format!(
        "ID: {}\nPartner: {} | Campaign: {} | Visitor: {}\nType: {} | Created: {}\nSource: {}\nDestination: {}",
        event.id().to_string().yellow(),
        event.partner_id(),
        event.campaign_id(),
        event.visitor_id(),
        event.interaction_type(),
        event.created_at().to_rfc3339(),
        event.source_url(),
        event.destination_url(),
    )
}

/// Example body for `POST /api/v1/tracking/events`
pub fn example_payload() -> RecordTrackingEvent {
    RecordTrackingEvent {
        partner_id: "google-ads".to_string(),
        campaign_id: "summer-sale-2025".to_string(),
        visitor_id: "user123".to_string(),
        interaction_type: InteractionType::Click,
        source_url: "https://google.com/ad".to_string(),
        destination_url: "https://mystore.com/products".to_string(),
    }
}

fn display_host(host: &str) -> &str {
    if host == "0.0.0.0" { "localhost" } else { host }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewTrackingEvent;

    #[test]
    fn test_example_payload_serializes_lowercase_type() {
        let json = serde_json::to_value(example_payload()).unwrap();
        assert_eq!(json["interaction_type"], "click");
        assert_eq!(json["partner_id"], "google-ads");
    }

    #[test]
    fn test_format_event_lists_all_fields() {
        colored::control::set_override(false);
        let event = TrackingEvent::record(NewTrackingEvent::from(example_payload())).unwrap();
        let text = format_event(&event);
        assert!(text.contains(&event.id().to_string()));
        assert!(text.contains("Partner: google-ads | Campaign: summer-sale-2025"));
        assert!(text.contains("Type: click"));
        assert!(text.contains("Destination: https://mystore.com/products"));
    }

    async fn temp_service() -> (TrackingService, tempfile::TempDir) {
        let dir = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("inspect.db").display());
        let storage = crate::storage::SeaOrmStorage::new(&url, "sqlite").await.unwrap();
        let service = TrackingService::new(Arc::new(storage), Arc::new(EventPublisher::new()));
        (service, dir)
    }

    #[tokio::test]
    async fn test_report_on_empty_store_shows_example() {
        colored::control::set_override(false);
        let (service, _dir) = temp_service().await;

        let report = inspect_report(&service, &ServerConfig::default(), 5)
            .await
            .unwrap();
        assert!(report.contains("Backend: sqlite"));
        assert!(report.contains("Total tracking events: 0"));
        assert!(report.contains("http://localhost:8000/api/v1/tracking/events"));
        assert!(report.contains("\"interaction_type\": \"click\""));
    }

    #[tokio::test]
    async fn test_report_lists_latest_events_up_to_limit() {
        colored::control::set_override(false);
        let (service, _dir) = temp_service().await;
        for _ in 0..3 {
            service.record(example_payload()).await.unwrap();
        }

        let report = inspect_report(&service, &ServerConfig::default(), 2)
            .await
            .unwrap();
        assert!(report.contains("Total tracking events: 3"));
        assert!(report.contains("Last 2 tracking event(s):"));
        assert_eq!(report.matches("Partner: google-ads").count(), 2);
    }

    #[test]
    fn test_display_host() {
        assert_eq!(display_host("0.0.0.0"), "localhost");
        assert_eq!(display_host("127.0.0.1"), "127.0.0.1");
    }
}
