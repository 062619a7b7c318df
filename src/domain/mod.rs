//! Tracking domain: the recorded interaction aggregate and its value types.

mod tracking_event;

pub use tracking_event::{InteractionType, MAX_IDENTIFIER_LEN, NewTrackingEvent, TrackingEvent};
