//! Routing configuration resolved for a link identifier.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use url::Url;
use validator::{Validate, ValidationError};

/// Override keys are ISO 3166-1 alpha-2 codes as sent by the edge.
pub(crate) static COUNTRY_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{2}$").unwrap());

/// Routing record stored for a link.
///
/// The JSON form matches what the link-management side writes into the
/// key-value store:
///
/// ```json
/// {
///   "linkId": "abc",
///   "accountId": "acct_1",
///   "destinations": {
///     "default": "https://a.example",
///     "US": "https://us.example"
///   }
/// }
/// ```
///
/// This service never mutates a routing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    #[validate(length(min = 1))]
    pub link_id: String,

    #[validate(length(min = 1))]
    pub account_id: String,

    #[validate(nested)]
    pub destinations: Destinations,
}

/// Default destination plus per-country overrides.
///
/// Overrides are flattened next to `default` in the stored JSON, keyed by
/// country code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Destinations {
    #[validate(custom(function = "validate_destination"))]
    pub default: String,

    #[serde(flatten)]
    #[validate(custom(function = "validate_overrides"))]
    pub overrides: HashMap<String, String>,
}

impl RoutingConfig {
    /// Creates a routing config without overrides.
    pub fn new(link_id: impl Into<String>, account_id: impl Into<String>, default_url: impl Into<String>) -> Self {
        Self {
            link_id: link_id.into(),
            account_id: account_id.into(),
            destinations: Destinations {
                default: default_url.into(),
                overrides: HashMap::new(),
            },
        }
    }

    /// Adds a country override, replacing any previous one for the same code.
    pub fn with_override(mut self, country: impl Into<String>, url: impl Into<String>) -> Self {
        self.destinations
            .overrides
            .insert(country.into(), url.into());
        self
    }

    /// The destination used when no override matches.
    pub fn default_url(&self) -> &str {
        &self.destinations.default
    }

    /// Looks up the override for an exact country code.
    pub fn override_for(&self, country: &str) -> Option<&str> {
        self.destinations.overrides.get(country).map(String::as_str)
    }

    /// Parses and validates a stored JSON record.
    ///
    /// # Errors
    ///
    /// Returns a human-readable reason when the JSON is malformed or the
    /// record breaks an invariant (missing default, bad override key, non-URL
    /// destination).
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        config.validate().map_err(|e| e.to_string())?;
        Ok(config)
    }
}

/// Destinations end up in a `Location` header, so they must be absolute
/// http(s) URLs made of visible ASCII.
fn validate_destination(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_graphic()) {
        return Err(ValidationError::new("destination_charset"));
    }

    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(_) => Err(ValidationError::new("destination_scheme")),
        Err(_) => Err(ValidationError::new("destination_url")),
    }
}

fn validate_overrides(overrides: &HashMap<String, String>) -> Result<(), ValidationError> {
    for (country, url) in overrides {
        if !COUNTRY_CODE_REGEX.is_match(country) {
            let mut error = ValidationError::new("override_country");
            error.add_param("country".into(), country);
            return Err(error);
        }
        validate_destination(url)?;
    }
    Ok(())
}
