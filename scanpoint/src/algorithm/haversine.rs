use crate::model::GeoPoint;

/// mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// great-circle distance between two coordinates in meters.
///
/// # Arguments
///
/// * `a` - first coordinate in degrees
/// * `b` - second coordinate in degrees
///
/// # Returns
///
/// haversine distance in meters using a spherical Earth of radius [`EARTH_RADIUS_KM`].
pub fn distance_meters(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();
    let h = (dlat / 2.0).sin() * (dlat / 2.0).sin()
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (dlon / 2.0).sin()
            * (dlon / 2.0).sin();
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = GeoPoint::new(44.34, -78.73);
        assert_eq!(distance_meters(&p, &p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(44.371398, -78.788005);
        let b = GeoPoint::new(44.297078, -78.744307);
        let ab = distance_meters(&a, &b);
        let ba = distance_meters(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // R * pi / 180 meters along a meridian
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(1.0, 0.0);
        let expected = EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI / 180.0;
        assert!((distance_meters(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_longitude_shrinks_with_latitude() {
        let equator = distance_meters(&GeoPoint::new(0.0, 0.0), &GeoPoint::new(0.0, 1.0));
        let north = distance_meters(&GeoPoint::new(60.0, 0.0), &GeoPoint::new(60.0, 1.0));
        // cos(60) = 0.5, within a small tolerance from the haversine curvature
        assert!((north / equator - 0.5).abs() < 1e-4);
    }
}
