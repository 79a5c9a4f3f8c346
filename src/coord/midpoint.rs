//! Great-circle geometry
//!
//! Midpoint, distance and intermediate points on a spherical Earth.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::{wrap_lng, Coordinates};

/// Great-circle midpoint between two coordinates
///
/// # Algorithm
/// With both points in radians:
/// - Bx = cos(lat2) * cos(dLon)
/// - By = cos(lat2) * sin(dLon)
/// - lat = atan2(sin(lat1) + sin(lat2), sqrt((cos(lat1) + Bx)^2 + By^2))
/// - lon = lon1 + atan2(By, cos(lat1) + Bx)
///
/// The longitude is wrapped only when it leaves [-180, 180], so a point
/// on the antimeridian keeps its sign. Identical inputs return the input.
///
/// Antipodal points have no unique midpoint; the denominator collapses
/// toward zero and the result, while finite, is numerically arbitrary.
pub fn midpoint(a: Coordinates, b: Coordinates) -> Coordinates {
    if a == b {
        return a;
    }

    let lat1 = a.lat.to_radians();
    let lon1 = a.lng.to_radians();
    let lat2 = b.lat.to_radians();
    let lon2 = b.lng.to_radians();

    let d_lon = lon2 - lon1;
    let bx = lat2.cos() * d_lon.cos();
    let by = lat2.cos() * d_lon.sin();

    let mid_lat = (lat1.sin() + lat2.sin()).atan2(((lat1.cos() + bx).powi(2) + by * by).sqrt());
    let mid_lon = (lon1 + by.atan2(lat1.cos() + bx)).to_degrees();
    let mid_lon = if (-180.0..=180.0).contains(&mid_lon) {
        mid_lon
    } else {
        wrap_lng(mid_lon)
    };

    Coordinates::new(mid_lat.to_degrees(), mid_lon)
}

/// Calculate the distance between two points in meters (Haversine formula)
///
/// Measured on a sphere of the WGS84 equatorial radius.
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Point at `fraction` of the way along the great circle from `a` to `b`
///
/// `fraction` 0.0 yields `a`, 1.0 yields `b`. Coincident points return `a`.
pub fn interpolate(a: Coordinates, b: Coordinates, fraction: f64) -> Coordinates {
    let delta = haversine_distance(a, b) / EARTH_RADIUS_METERS;
    if delta < 1e-12 {
        return a;
    }

    let lat1 = a.lat.to_radians();
    let lon1 = a.lng.to_radians();
    let lat2 = b.lat.to_radians();
    let lon2 = b.lng.to_radians();

    let wa = ((1.0 - fraction) * delta).sin() / delta.sin();
    let wb = (fraction * delta).sin() / delta.sin();

    let x = wa * lat1.cos() * lon1.cos() + wb * lat2.cos() * lon2.cos();
    let y = wa * lat1.cos() * lon1.sin() + wb * lat2.cos() * lon2.sin();
    let z = wa * lat1.sin() + wb * lat2.sin();

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);

    Coordinates::new(lat.to_degrees(), wrap_lng(lon.to_degrees()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const LONDON: Coordinates = Coordinates { lat: 51.5074, lng: -0.1278 };
    const PARIS: Coordinates = Coordinates { lat: 48.8566, lng: 2.3522 };

    #[test]
    fn test_midpoint_of_point_with_itself() {
        for point in [LONDON, PARIS, Coordinates::new(-33.8688, 151.2093), Coordinates::new(0.0, 0.0)] {
            let mid = midpoint(point, point);
            assert_abs_diff_eq!(mid.lat, point.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(mid.lng, point.lng, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_midpoint_on_antimeridian_keeps_sign() {
        for point in [Coordinates::new(10.0, 180.0), Coordinates::new(10.0, -180.0)] {
            assert_eq!(midpoint(point, point), point);
        }

        let mid = midpoint(Coordinates::new(0.0, 170.0), Coordinates::new(20.0, 180.0));
        assert!(mid.validate().is_ok());
        assert!(mid.lng > 0.0, "midpoint {:?} should stay east of the meridian", mid);
    }

    #[test]
    fn test_midpoint_is_symmetric() {
        let pairs = [
            (LONDON, PARIS),
            (Coordinates::new(40.7128, -74.0060), Coordinates::new(35.6762, 139.6503)),
            (Coordinates::new(-33.8688, 151.2093), Coordinates::new(-23.5505, -46.6333)),
        ];

        for (a, b) in pairs {
            let ab = midpoint(a, b);
            let ba = midpoint(b, a);
            assert_abs_diff_eq!(ab.lat, ba.lat, epsilon = 1e-9);
            assert_abs_diff_eq!(ab.lng, ba.lng, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_midpoint_london_paris() {
        let mid = midpoint(LONDON, PARIS);
        assert_abs_diff_eq!(mid.lat, 50.17, epsilon = 0.05);
        assert_abs_diff_eq!(mid.lng, 1.12, epsilon = 0.05);
    }

    #[test]
    fn test_midpoint_along_equator() {
        let mid = midpoint(Coordinates::new(0.0, 10.0), Coordinates::new(0.0, 30.0));
        assert_abs_diff_eq!(mid.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.lng, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn test_midpoint_across_antimeridian() {
        let mid = midpoint(Coordinates::new(10.0, 179.0), Coordinates::new(10.0, -177.0));
        assert!(mid.validate().is_ok(), "midpoint {:?} should be a valid coordinate", mid);
        assert_abs_diff_eq!(mid.lng, -179.0, epsilon = 0.01);
    }

    #[test]
    fn test_midpoint_antipodal_is_finite() {
        let mid = midpoint(Coordinates::new(0.0, 0.0), Coordinates::new(0.0, 180.0));
        assert!(mid.lat.is_finite());
        assert!(mid.lng.is_finite());

        let mid = midpoint(Coordinates::new(10.0, 20.0), Coordinates::new(-10.0, -160.0));
        assert!(mid.lat.is_finite());
        assert!(mid.lng.is_finite());
    }

    #[test]
    fn test_haversine_london_paris() {
        let distance = haversine_distance(LONDON, PARIS);
        assert!(
            (distance - 343_941.0).abs() < 1.0,
            "Distance {} should be approximately 343.94 km",
            distance
        );
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let nyc = Coordinates::new(40.7128, -74.0060);
        let nearby = Coordinates::new(41.7128, -74.0060);

        let distance = haversine_distance(nyc, nearby);
        assert!(
            (distance - 111_319.5).abs() < 1.0,
            "Distance {} should be approximately 111319.5",
            distance
        );
    }

    #[test]
    fn test_haversine_zero() {
        assert_eq!(haversine_distance(PARIS, PARIS), 0.0);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let start = interpolate(LONDON, PARIS, 0.0);
        let end = interpolate(LONDON, PARIS, 1.0);

        assert_abs_diff_eq!(start.lat, LONDON.lat, epsilon = 1e-9);
        assert_abs_diff_eq!(start.lng, LONDON.lng, epsilon = 1e-9);
        assert_abs_diff_eq!(end.lat, PARIS.lat, epsilon = 1e-9);
        assert_abs_diff_eq!(end.lng, PARIS.lng, epsilon = 1e-9);
    }

    #[test]
    fn test_interpolate_half_matches_midpoint() {
        let a = Coordinates::new(40.7128, -74.0060);
        let b = Coordinates::new(35.6762, 139.6503);

        let half = interpolate(a, b, 0.5);
        let mid = midpoint(a, b);

        assert_abs_diff_eq!(half.lat, mid.lat, epsilon = 1e-6);
        assert_abs_diff_eq!(half.lng, mid.lng, epsilon = 1e-6);
    }

    #[test]
    fn test_interpolate_coincident_points() {
        assert_eq!(interpolate(PARIS, PARIS, 0.5), PARIS);
    }
}
