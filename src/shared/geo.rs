use std::fmt;

use thiserror::Error;

/// Mean Earth radius in kilometers (for the haversine formula)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// True when latitude lies in [-90, 90] and longitude in [-180, 180].
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedCoordinate {
    #[error("coordinate string is empty")]
    Empty,
    #[error("expected \"lat,lon\" separated by a comma")]
    MissingSeparator,
    #[error("latitude '{0}' is not a finite number")]
    InvalidLatitude(String),
    #[error("longitude '{0}' is not a finite number")]
    InvalidLongitude(String),
}

/// Parse a `"lat,lon"` string into a coordinate pair.
///
/// Both halves are trimmed and parsed as IEEE-754 doubles; non-finite
/// values are rejected. Batch callers should skip the failing record and
/// keep processing the rest, stored data is not validated upstream.
pub fn parse_coordinates(input: &str) -> Result<Coordinates, MalformedCoordinate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MalformedCoordinate::Empty);
    }

    let (raw_lat, raw_lon) = trimmed
        .split_once(',')
        .ok_or(MalformedCoordinate::MissingSeparator)?;
    let raw_lat = raw_lat.trim();
    let raw_lon = raw_lon.trim();

    let latitude = raw_lat
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| MalformedCoordinate::InvalidLatitude(raw_lat.to_string()))?;
    let longitude = raw_lon
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| MalformedCoordinate::InvalidLongitude(raw_lon.to_string()))?;

    Ok(Coordinates {
        latitude,
        longitude,
    })
}

/// Great-circle distance between two points in kilometers (haversine).
///
/// Defined for any two finite pairs; identical points give 0 and NaN
/// inputs propagate to the output, validation belongs to the caller.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.latitude.to_radians();
    let lat2_rad = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Two-decimal rounding for displayed kilometers and ratings.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_pair() {
        let parsed = parse_coordinates("-7.5707,110.8281").unwrap();
        assert!((parsed.latitude - -7.5707).abs() < 1e-9);
        assert!((parsed.longitude - 110.8281).abs() < 1e-9);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse_coordinates("  -6.2 ,  106.816666  ").unwrap();
        assert!((parsed.latitude - -6.2).abs() < 1e-9);
        assert!((parsed.longitude - 106.816666).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(parse_coordinates(""), Err(MalformedCoordinate::Empty));
        assert_eq!(parse_coordinates("   "), Err(MalformedCoordinate::Empty));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_eq!(
            parse_coordinates("110.8281"),
            Err(MalformedCoordinate::MissingSeparator)
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric_halves() {
        assert_eq!(
            parse_coordinates("abc,123"),
            Err(MalformedCoordinate::InvalidLatitude("abc".to_string()))
        );
        assert_eq!(
            parse_coordinates("-7.57,elsewhere"),
            Err(MalformedCoordinate::InvalidLongitude("elsewhere".to_string()))
        );
        // a second comma lands in the longitude half
        assert_eq!(
            parse_coordinates("1,2,3"),
            Err(MalformedCoordinate::InvalidLongitude("2,3".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_non_finite_values() {
        assert!(parse_coordinates("NaN,110.0").is_err());
        assert!(parse_coordinates("-7.5,inf").is_err());
    }

    #[test]
    fn test_parse_format_round_trip() {
        let original = parse_coordinates("-7.5707,110.8281").unwrap();
        let reparsed = parse_coordinates(&original.to_string()).unwrap();
        assert!((original.latitude - reparsed.latitude).abs() < 1e-9);
        assert!((original.longitude - reparsed.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_range_check() {
        assert!(parse_coordinates("-7.57,110.82").unwrap().in_range());
        assert!(!parse_coordinates("91.0,0.0").unwrap().in_range());
        assert!(!parse_coordinates("0.0,-180.5").unwrap().in_range());
    }

    #[test]
    fn test_distance_identical_points_is_zero() {
        let here = Coordinates {
            latitude: -7.5707,
            longitude: 110.8281,
        };
        assert_eq!(round2(haversine_km(here, here)), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinates {
            latitude: -7.5707,
            longitude: 110.8281,
        };
        let b = Coordinates {
            latitude: -6.2,
            longitude: 106.816666,
        };
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_distance_nearby_points() {
        let a = parse_coordinates("-7.5707,110.8281").unwrap();
        let b = parse_coordinates("-7.5800,110.8300").unwrap();
        let distance = haversine_km(a, b);
        assert!((distance - 1.04).abs() <= 0.05, "got {distance}");
    }

    #[test]
    fn test_distance_antipodal_points() {
        let a = Coordinates {
            latitude: 0.0,
            longitude: 0.0,
        };
        let b = Coordinates {
            latitude: 0.0,
            longitude: 180.0,
        };
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_KM;
        assert!((haversine_km(a, b) - half_circumference).abs() < 0.01);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(11.0 / 3.0), 3.67);
        assert_eq!(round2(1.005), 1.0); // binary 1.005 sits just below the midpoint
        assert_eq!(round2(0.0), 0.0);
    }
}
