//! Click event model and its queue envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::geo::GeoMetadata;

/// A single redirect, as reported to the analytics queue.
///
/// Built once per successfully dispatched request and handed off to the
/// event queue; nothing in this service keeps it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub id: String,
    pub country: String,
    pub destination: String,
    pub account_id: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(with = "iso_millis")]
    pub timestamp: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event.
    ///
    /// # Arguments
    ///
    /// - `id` - The link identifier taken from the request path
    /// - `geo` - Validated requester geography
    /// - `destination` - The URL the requester is redirected to
    /// - `account_id` - Owner of the link
    /// - `timestamp` - Dispatch time
    pub fn new(
        id: impl Into<String>,
        geo: &GeoMetadata,
        destination: impl Into<String>,
        account_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            country: geo.country.clone(),
            destination: destination.into(),
            account_id: account_id.into(),
            latitude: geo.latitude,
            longitude: geo.longitude,
            timestamp,
        }
    }
}

/// Message envelope on the wire.
///
/// Serializes as `{"type": "LINK_CLICK", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum QueueMessage {
    #[serde(rename = "LINK_CLICK")]
    LinkClick(ClickEvent),
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
