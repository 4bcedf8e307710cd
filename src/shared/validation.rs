use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::geo;

lazy_static! {
    /// Regex for the form shape of coordinate fields: two signed decimal
    /// numbers joined by a comma, with optional surrounding whitespace
    /// - Valid: "-7.5707,110.8281", "0,0", " -6.2 , 106.8 "
    /// - Invalid: "abc,123", "110.8281", "1,2,3"
    pub static ref COORDINATES_REGEX: Regex =
        Regex::new(r"^\s*-?\d+(\.\d+)?\s*,\s*-?\d+(\.\d+)?\s*$").unwrap();
}

/// Validator hook for coordinate form fields.
///
/// Stricter than the batch parser on purpose: input typed into a form must
/// look like plain decimal degrees and lie within the valid ranges.
pub fn validate_coordinates(value: &str) -> Result<(), ValidationError> {
    if !COORDINATES_REGEX.is_match(value) {
        return Err(coordinate_error(
            "expected \"lat,lon\" as decimal degrees, e.g. -6.200000,106.816666",
        ));
    }

    let coordinates = geo::parse_coordinates(value)
        .map_err(|_| coordinate_error("coordinates could not be parsed"))?;
    if !coordinates.in_range() {
        return Err(coordinate_error(
            "latitude must be within [-90,90] and longitude within [-180,180]",
        ));
    }

    Ok(())
}

/// Validator hook rejecting values that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("must not be blank".into());
        return Err(error);
    }
    Ok(())
}

fn coordinate_error(message: &'static str) -> ValidationError {
    let mut error = ValidationError::new("coordinates");
    error.message = Some(message.into());
    error
}
