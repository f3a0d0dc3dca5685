// ABOUTME: Location normalizer - canonicalizes "lat,lng" strings and passes
// ABOUTME: free-form addresses through untouched for upstream geocoding.

use std::sync::LazyLock;

use regex::Regex;

static COORDINATES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?\d+(?:\.\d+)?),\s*([+-]?\d+(?:\.\d+)?)$").expect("valid coordinate regex")
});

/// Normalize a location string before it is sent upstream.
///
/// A coordinate pair such as `" 40.7128, -74.0060 "` becomes
/// `"40.7128,-74.0060"`. Anything else is returned unchanged.
pub fn normalize_location(raw: &str) -> String {
    match COORDINATES.captures(raw.trim()) {
        Some(caps) => format!("{},{}", &caps[1], &caps[2]),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinates_with_space_after_comma() {
        assert_eq!(normalize_location("40.7128, -74.0060"), "40.7128,-74.0060");
    }

    #[test]
    fn test_coordinates_already_canonical() {
        assert_eq!(normalize_location("40.7128,-74.0060"), "40.7128,-74.0060");
    }

    #[test]
    fn test_coordinates_trimmed() {
        assert_eq!(normalize_location("  +51.5,\t-0.12  "), "+51.5,-0.12");
    }

    #[test]
    fn test_integer_coordinates() {
        assert_eq!(normalize_location("10,20"), "10,20");
    }

    #[test]
    fn test_addresses_unchanged() {
        for address in [
            "Boston, MA",
            "1600 Amphitheatre Parkway, Mountain View, CA",
            "  Times Square  ",
            "40.7128",
            "40.7128 ,-74.0060",
            "40.,-74",
            "",
        ] {
            assert_eq!(normalize_location(address), address);
        }
    }
}
