pub mod tracking_service;

pub use tracking_service::{RecordTrackingEvent, StorageHealth, TrackingService};
