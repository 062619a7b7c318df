//! TrackingService tests
//!
//! Covers the record path (validate, persist, publish) against a temporary
//! SQLite database and in-test event handlers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use sea_orm::ConnectionTrait;
use tempfile::TempDir;
use tracking_service::config::init_config;
use tracking_service::domain::InteractionType;
use tracking_service::errors::TrackingError;
use tracking_service::events::{
    AttributionHandler, Event, EventHandler, EventPublisher, HandlerResult, event_types,
};
use tracking_service::services::{RecordTrackingEvent, TrackingService};
use tracking_service::storage::SeaOrmStorage;
use uuid::Uuid;

static INIT: Once = Once::new();

fn init_test_config() {
    INIT.call_once(|| {
        init_config();
    });
}

/// Records the ids it was invoked with
#[derive(Default)]
struct RecordingHandler {
    seen: Mutex<Vec<Uuid>>,
}

#[async_trait]
impl EventHandler for RecordingHandler {
    async fn handle(&self, event: &Event) -> HandlerResult {
        let payload = event
            .as_tracking_event_recorded()
            .ok_or("unexpected payload")?;
        self.seen.lock().unwrap().push(payload.tracking_event_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

#[derive(Default)]
struct FailingHandler {
    calls: AtomicUsize,
}

#[async_trait]
impl EventHandler for FailingHandler {
    async fn handle(&self, _event: &Event) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err("attribution backend unavailable".into())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct PanickingHandler;

#[async_trait]
impl EventHandler for PanickingHandler {
    async fn handle(&self, _event: &Event) -> HandlerResult {
        panic!("attribution model crashed");
    }

    fn name(&self) -> &str {
        "panicking"
    }
}

fn click_request() -> RecordTrackingEvent {
    RecordTrackingEvent {
        partner_id: "google-ads".to_string(),
        campaign_id: "summer-sale-2025".to_string(),
        visitor_id: "user123".to_string(),
        interaction_type: InteractionType::Click,
        source_url: "https://google.com/ad".to_string(),
        destination_url: "https://mystore.com/products".to_string(),
    }
}

async fn create_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_test_config();

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_url = format!(
        "sqlite://{}?mode=rwc",
        temp_dir.path().join("service.db").display()
    );
    let storage = SeaOrmStorage::new(&db_url, "sqlite")
        .await
        .expect("Failed to create storage");

    (Arc::new(storage), temp_dir)
}

#[tokio::test]
async fn test_record_persists_and_publishes() {
    let (storage, _dir) = create_storage().await;
    let recorder = Arc::new(RecordingHandler::default());

    let mut publisher = EventPublisher::new();
    publisher.register(event_types::TRACKING_EVENT_RECORDED, recorder.clone());
    let service = TrackingService::new(storage.clone(), Arc::new(publisher));

    let event = service.record(click_request()).await.expect("record should succeed");

    assert_eq!(event.id().get_version_num(), 4);
    assert_eq!(storage.count().await.unwrap(), 1);
    assert_eq!(*recorder.seen.lock().unwrap(), vec![event.id()]);

    let loaded = service.get(event.id()).await.unwrap();
    assert_eq!(loaded.campaign_id(), "summer-sale-2025");
}

#[tokio::test]
async fn test_handler_failure_does_not_fail_record() {
    let (storage, _dir) = create_storage().await;
    let failing = Arc::new(FailingHandler::default());
    let recorder = Arc::new(RecordingHandler::default());

    let mut publisher = EventPublisher::new();
    publisher.register(event_types::TRACKING_EVENT_RECORDED, failing.clone());
    publisher.register(event_types::TRACKING_EVENT_RECORDED, recorder.clone());
    let service = TrackingService::new(storage.clone(), Arc::new(publisher));

    let event = service.record(click_request()).await.expect("record should succeed");

    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    // 后续处理器仍被调用
    assert_eq!(*recorder.seen.lock().unwrap(), vec![event.id()]);
    assert!(storage.get(event.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_invalid_request_persists_nothing() {
    let (storage, _dir) = create_storage().await;
    let recorder = Arc::new(RecordingHandler::default());

    let mut publisher = EventPublisher::new();
    publisher.register(event_types::TRACKING_EVENT_RECORDED, recorder.clone());
    let service = TrackingService::new(storage.clone(), Arc::new(publisher));

    let mut req = click_request();
    req.visitor_id = "   ".to_string();
    let err = service.record(req).await.unwrap_err();

    assert!(matches!(err, TrackingError::Validation(_)));
    assert!(err.message().contains("visitor_id"));
    assert_eq!(storage.count().await.unwrap(), 0);
    assert!(recorder.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_persist_failure_publishes_nothing() {
    let (storage, _dir) = create_storage().await;
    let recorder = Arc::new(RecordingHandler::default());

    let mut publisher = EventPublisher::new();
    publisher.register(event_types::TRACKING_EVENT_RECORDED, recorder.clone());
    let service = TrackingService::new(storage.clone(), Arc::new(publisher));

    storage
        .get_db()
        .execute_unprepared("DROP TABLE tracking_events")
        .await
        .expect("Failed to drop table");

    let err = service.record(click_request()).await.unwrap_err();

    assert!(matches!(err, TrackingError::DatabaseOperation(_)));
    assert!(!err.is_client_error());
    assert!(recorder.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_panicking_handler_is_isolated() {
    let (storage, _dir) = create_storage().await;
    let recorder = Arc::new(RecordingHandler::default());

    let mut publisher = EventPublisher::new();
    publisher.register(event_types::TRACKING_EVENT_RECORDED, Arc::new(PanickingHandler));
    publisher.register(event_types::TRACKING_EVENT_RECORDED, recorder.clone());
    let service = TrackingService::new(storage.clone(), Arc::new(publisher));

    let event = service.record(click_request()).await.expect("record should succeed");

    assert_eq!(*recorder.seen.lock().unwrap(), vec![event.id()]);
    assert!(storage.get(event.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_get_unknown_is_not_found() {
    let (storage, _dir) = create_storage().await;
    let service = TrackingService::new(storage, Arc::new(EventPublisher::new()));

    let err = service.get(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, TrackingError::NotFound(_)));
}

#[tokio::test]
async fn test_every_record_gets_a_fresh_id() {
    let (storage, _dir) = create_storage().await;
    let mut publisher = EventPublisher::new();
    publisher.register(
        event_types::TRACKING_EVENT_RECORDED,
        Arc::new(AttributionHandler::new()),
    );
    let service = TrackingService::new(storage, Arc::new(publisher));

    let mut ids = std::collections::HashSet::new();
    for _ in 0..10 {
        let event = service.record(click_request()).await.unwrap();
        assert!(ids.insert(event.id()));
    }
    assert_eq!(service.count().await.unwrap(), 10);
}

#[tokio::test]
async fn test_health_reports_backend_and_count() {
    let (storage, _dir) = create_storage().await;
    let service = TrackingService::new(storage, Arc::new(EventPublisher::new()));
    service.record(click_request()).await.unwrap();

    let health = service.health().await;
    assert!(health.reachable);
    assert_eq!(health.backend, "sqlite");
    assert_eq!(health.events_count, Some(1));
    assert!(health.error.is_none());

    let liveness = service.liveness().await;
    assert!(liveness.reachable);
    assert!(liveness.events_count.is_none());
}
