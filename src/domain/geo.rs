//! Requester geography: the raw per-request blob and its validated form.

use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::routing_config::COUNTRY_CODE_REGEX;

/// Geo signal exactly as the transport layer supplied it.
///
/// Every field is a raw string; nothing is trusted until
/// [`GeoMetadata::try_from`] has run. A missing header shows up as an empty
/// `country` or a `None` coordinate.
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct GeoContext {
    #[validate(regex(path = *COUNTRY_CODE_REGEX, message = "country must be a two-letter code"))]
    pub country: String,

    #[validate(custom(function = "validate_latitude"))]
    pub latitude: Option<String>,

    #[validate(custom(function = "validate_longitude"))]
    pub longitude: Option<String>,
}

impl GeoContext {
    pub fn new(
        country: impl Into<String>,
        latitude: Option<String>,
        longitude: Option<String>,
    ) -> Self {
        Self {
            country: country.into(),
            latitude,
            longitude,
        }
    }
}

/// Validated geo signal used for destination selection and click events.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoMetadata {
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl TryFrom<&GeoContext> for GeoMetadata {
    type Error = ValidationErrors;

    fn try_from(raw: &GeoContext) -> Result<Self, Self::Error> {
        raw.validate()?;

        Ok(Self {
            country: raw.country.clone(),
            latitude: raw.latitude.as_deref().and_then(parse_coordinate),
            longitude: raw.longitude.as_deref().and_then(parse_coordinate),
        })
    }
}

fn parse_coordinate(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn validate_latitude(value: &str) -> Result<(), ValidationError> {
    match parse_coordinate(value) {
        Some(v) if (-90.0..=90.0).contains(&v) => Ok(()),
        _ => Err(ValidationError::new("latitude")),
    }
}

fn validate_longitude(value: &str) -> Result<(), ValidationError> {
    match parse_coordinate(value) {
        Some(v) if (-180.0..=180.0).contains(&v) => Ok(()),
        _ => Err(ValidationError::new("longitude")),
    }
}
