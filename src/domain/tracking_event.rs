use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::errors::{Result, TrackingError};

/// partner_id / campaign_id / visitor_id 的最大长度（字符）
pub const MAX_IDENTIFIER_LEN: usize = 255;

/// 互动类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InteractionType {
    Click,
    View,
    Engagement,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::View => "view",
            Self::Engagement => "engagement",
        }
    }

    /// Parse a stored or submitted tag, reporting a validation error on
    /// anything outside the three known values.
    pub fn parse(value: &str) -> Result<Self> {
        Self::from_str(value).map_err(|_| {
            TrackingError::validation(format!(
                "interaction_type: invalid value '{}'. Valid: click, view, engagement",
                value
            ))
        })
    }
}

/// Input for recording one interaction, before an id is assigned
#[derive(Debug, Clone)]
pub struct NewTrackingEvent {
    pub partner_id: String,
    pub campaign_id: String,
    pub visitor_id: String,
    pub interaction_type: InteractionType,
    pub source_url: String,
    pub destination_url: String,
}

/// A recorded marketing interaction between a partner and a visitor.
///
/// Created once on ingestion and never mutated afterwards, so all fields
/// are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingEvent {
    tracking_event_id: Uuid,
    partner_id: String,
    campaign_id: String,
    visitor_id: String,
    interaction_type: InteractionType,
    source_url: String,
    destination_url: String,
    recorded_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TrackingEvent {
    /// Validate the input and build a new aggregate with a fresh UUID v4.
    pub fn record(input: NewTrackingEvent) -> Result<Self> {
        let partner_id = require_identifier("partner_id", input.partner_id)?;
        let campaign_id = require_identifier("campaign_id", input.campaign_id)?;
        let visitor_id = require_identifier("visitor_id", input.visitor_id)?;
        let source_url = require_non_empty("source_url", input.source_url)?;
        let destination_url = require_non_empty("destination_url", input.destination_url)?;

        let now = Utc::now();
        Ok(Self {
            tracking_event_id: Uuid::new_v4(),
            partner_id,
            campaign_id,
            visitor_id,
            interaction_type: input.interaction_type,
            source_url,
            destination_url,
            recorded_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Rebuild an aggregate that was already persisted. No validation runs
    /// here; the row was validated when it was recorded.
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        tracking_event_id: Uuid,
        partner_id: String,
        campaign_id: String,
        visitor_id: String,
        interaction_type: InteractionType,
        source_url: String,
        destination_url: String,
        recorded_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tracking_event_id,
            partner_id,
            campaign_id,
            visitor_id,
            interaction_type,
            source_url,
            destination_url,
            recorded_at,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.tracking_event_id
    }

    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    pub fn campaign_id(&self) -> &str {
        &self.campaign_id
    }

    pub fn visitor_id(&self) -> &str {
        &self.visitor_id
    }

    pub fn interaction_type(&self) -> InteractionType {
        self.interaction_type
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn destination_url(&self) -> &str {
        &self.destination_url
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Identifiers are stored in `VARCHAR(255)` columns; longer values must be
/// rejected here, not by the database.
fn require_identifier(field: &str, value: String) -> Result<String> {
    let value = require_non_empty(field, value)?;
    let len = value.chars().count();
    if len > MAX_IDENTIFIER_LEN {
        return Err(TrackingError::validation(format!(
            "{}: must be at most {} characters (got {})",
            field, MAX_IDENTIFIER_LEN, len
        )));
    }
    Ok(value)
}

fn require_non_empty(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(TrackingError::validation(format!(
            "{}: must not be empty",
            field
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn sample_input() -> NewTrackingEvent {
        NewTrackingEvent {
            partner_id: "google-ads".to_string(),
            campaign_id: "summer-sale-2025".to_string(),
            visitor_id: "user123".to_string(),
            interaction_type: InteractionType::Click,
            source_url: "https://google.com/ad".to_string(),
            destination_url: "https://mystore.com/products".to_string(),
        }
    }

    #[test]
    fn test_interaction_type_parse() {
        assert_eq!(InteractionType::parse("click").unwrap(), InteractionType::Click);
        assert_eq!(InteractionType::parse("view").unwrap(), InteractionType::View);
        assert_eq!(
            InteractionType::parse("engagement").unwrap(),
            InteractionType::Engagement
        );

        let err = InteractionType::parse("purchase").unwrap_err();
        assert!(matches!(err, TrackingError::Validation(_)));
        assert!(err.message().contains("purchase"));
    }

    #[test]
    fn test_interaction_type_tags_agree() {
        for variant in InteractionType::iter() {
            assert_eq!(variant.as_str(), variant.to_string());
            assert_eq!(variant.as_str(), variant.as_ref());
            let json = serde_json::to_string(&variant).unwrap();
            assert_eq!(json, format!("\"{}\"", variant.as_str()));
        }
    }

    #[test]
    fn test_interaction_type_rejects_unknown_json() {
        let result: std::result::Result<InteractionType, _> = serde_json::from_str("\"purchase\"");
        assert!(result.is_err());
        // 大小写敏感
        let result: std::result::Result<InteractionType, _> = serde_json::from_str("\"Click\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_record_assigns_id_and_timestamps() {
        let event = TrackingEvent::record(sample_input()).unwrap();

        assert_eq!(event.id().get_version_num(), 4);
        assert_eq!(event.partner_id(), "google-ads");
        assert_eq!(event.interaction_type(), InteractionType::Click);
        assert_eq!(event.created_at(), event.updated_at());
        assert_eq!(event.recorded_at(), event.created_at());
    }

    #[test]
    fn test_record_identifier_length_boundary() {
        let mut input = sample_input();
        input.partner_id = "p".repeat(MAX_IDENTIFIER_LEN);
        input.campaign_id = "é".repeat(MAX_IDENTIFIER_LEN);
        assert!(TrackingEvent::record(input).is_ok());

        for field in ["partner_id", "campaign_id", "visitor_id"] {
            let mut input = sample_input();
            let too_long = "x".repeat(MAX_IDENTIFIER_LEN + 1);
            match field {
                "partner_id" => input.partner_id = too_long,
                "campaign_id" => input.campaign_id = too_long,
                _ => input.visitor_id = too_long,
            }
            let err = TrackingEvent::record(input).unwrap_err();
            assert!(matches!(err, TrackingError::Validation(_)));
            assert!(err.message().starts_with(field), "{}", err.message());
            assert!(err.is_client_error());
        }
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = TrackingEvent::record(sample_input()).unwrap();
        let b = TrackingEvent::record(sample_input()).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_record_rejects_blank_fields() {
        let mut input = sample_input();
        input.visitor_id = "   ".to_string();
        let err = TrackingEvent::record(input).unwrap_err();
        assert!(matches!(err, TrackingError::Validation(_)));
        assert!(err.message().starts_with("visitor_id"));

        let mut input = sample_input();
        input.destination_url = String::new();
        let err = TrackingEvent::record(input).unwrap_err();
        assert!(err.message().starts_with("destination_url"));
    }
}
