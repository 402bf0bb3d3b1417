//! Destination selection by requester country.

use crate::domain::entities::RoutingConfig;

/// Picks the destination URL for a requester.
///
/// Returns the override registered for `country` when one exists, otherwise
/// the config's default. Matching is an exact, case-sensitive comparison on
/// the validated code; there is no region or prefix matching.
pub fn select_destination<'a>(config: &'a RoutingConfig, country: Option<&str>) -> &'a str {
    country
        .and_then(|code| config.override_for(code))
        .unwrap_or_else(|| config.default_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RoutingConfig {
        RoutingConfig::new("abc", "acct_1", "https://a.example")
            .with_override("US", "https://us.example")
            .with_override("DE", "https://de.example")
    }

    #[test]
    fn test_matching_override() {
        let config = config();
        assert_eq!(select_destination(&config, Some("US")), "https://us.example");
        assert_eq!(select_destination(&config, Some("DE")), "https://de.example");
    }

    #[test]
    fn test_unmatched_country_uses_default() {
        let config = config();
        assert_eq!(select_destination(&config, Some("FR")), "https://a.example");
        assert_eq!(select_destination(&config, Some("XX")), "https://a.example");
    }

    #[test]
    fn test_absent_or_empty_country_uses_default() {
        let config = config();
        assert_eq!(select_destination(&config, None), "https://a.example");
        assert_eq!(select_destination(&config, Some("")), "https://a.example");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let config = config();
        assert_eq!(select_destination(&config, Some("us")), "https://a.example");
    }

    #[test]
    fn test_no_overrides() {
        let config = RoutingConfig::new("plain", "acct_2", "https://plain.example");
        assert_eq!(select_destination(&config, Some("US")), "https://plain.example");
    }

    #[test]
    fn test_deterministic() {
        let config = config();
        let first = select_destination(&config, Some("US"));
        for _ in 0..10 {
            assert_eq!(select_destination(&config, Some("US")), first);
        }
    }
}
