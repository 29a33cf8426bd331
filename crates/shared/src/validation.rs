//! Common validation utilities.

use validator::ValidationError;

/// Validates that a latitude value is within valid range (-90 to 90).
pub fn validate_latitude(lat: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&lat) {
        Ok(())
    } else {
        let mut err = ValidationError::new("latitude_range");
        err.message = Some("Latitude must be between -90 and 90".into());
        Err(err)
    }
}

/// Validates that a longitude value is within valid range (-180 to 180).
pub fn validate_longitude(lon: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&lon) {
        Ok(())
    } else {
        let mut err = ValidationError::new("longitude_range");
        err.message = Some("Longitude must be between -180 and 180".into());
        Err(err)
    }
}

/// Validates that a head count (capacity, occupancy) is non-negative.
///
/// Occupancy above capacity is accepted: shelters routinely overflow.
pub fn validate_head_count(count: i32) -> Result<(), ValidationError> {
    if count >= 0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("head_count_range");
        err.message = Some("Head count must be non-negative".into());
        Err(err)
    }
}

/// Validates that a search radius in kilometres is positive.
pub fn validate_radius_km(radius: f64) -> Result<(), ValidationError> {
    if radius > 0.0 && radius.is_finite() {
        Ok(())
    } else {
        let mut err = ValidationError::new("radius_range");
        err.message = Some("Radius must be a positive number of kilometres".into());
        Err(err)
    }
}
