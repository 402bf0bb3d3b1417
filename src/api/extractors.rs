//! Request extractors.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;

use crate::domain::geo::GeoContext;

/// Visitor country as ISO 3166-1 alpha-2, or `XX` / `T1`.
pub const COUNTRY_HEADER: &str = "cf-ipcountry";
pub const LATITUDE_HEADER: &str = "cf-iplatitude";
pub const LONGITUDE_HEADER: &str = "cf-iplongitude";

/// Builds the raw [`GeoContext`] from the edge's visitor-location headers.
///
/// Never rejects: a missing or non-UTF-8 header is treated as absent and
/// validation is left to the redirect flow, after the identifier resolved.
impl<S> FromRequestParts<S> for GeoContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(geo_from_headers(&parts.headers))
    }
}

fn geo_from_headers(headers: &HeaderMap) -> GeoContext {
    GeoContext::new(
        header_str(headers, COUNTRY_HEADER).unwrap_or_default(),
        header_str(headers, LATITUDE_HEADER).map(str::to_string),
        header_str(headers, LONGITUDE_HEADER).map(str::to_string),
    )
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_all_headers_present() {
        let mut headers = HeaderMap::new();
        headers.insert(COUNTRY_HEADER, HeaderValue::from_static("US"));
        headers.insert(LATITUDE_HEADER, HeaderValue::from_static("40.7128"));
        headers.insert(LONGITUDE_HEADER, HeaderValue::from_static(" -74.0060 "));

        let geo = geo_from_headers(&headers);

        assert_eq!(geo.country, "US");
        assert_eq!(geo.latitude.as_deref(), Some("40.7128"));
        assert_eq!(geo.longitude.as_deref(), Some("-74.0060"));
    }

    #[test]
    fn test_missing_headers_are_absent() {
        let geo = geo_from_headers(&HeaderMap::new());

        assert_eq!(geo, GeoContext::default());
    }

    #[test]
    fn test_non_utf8_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LATITUDE_HEADER,
            HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap(),
        );

        assert_eq!(geo_from_headers(&headers).latitude, None);
    }

    #[test]
    fn test_unrelated_headers_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert("x-country", HeaderValue::from_static("DE"));

        assert_eq!(geo_from_headers(&headers).country, "");
    }
}
