//! Geodesy helpers: distances, bearings and destination points.
//!
//! Ellipsoidal computations go through `geo`'s WGS-84 [`Geodesic`]
//! (Karney's algorithms), spherical ones through its [`Haversine`] measure
//! on the IUGG mean radius. Routes pick one via [`EarthModel`].

use geo::{Destination, Distance, Geodesic, Haversine, Point};
use serde::{Deserialize, Serialize};

/// Which Earth model segment lengths and projections are computed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EarthModel {
    /// WGS-84 ellipsoid
    #[default]
    Wgs84,
    /// Mean-radius sphere; great circles end exactly on their target
    Sphere,
}

impl EarthModel {
    /// Distance in kilometers between two points.
    pub fn distance_km(self, lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
        match self {
            EarthModel::Wgs84 => geodesic_distance_km(lat1, lon1, lat2, lon2),
            EarthModel::Sphere => haversine_distance_km(lat1, lon1, lat2, lon2),
        }
    }

    /// Point reached from `(lat, lon)` after `distance_km` along `bearing_deg`.
    pub fn destination(self, lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
        match self {
            EarthModel::Wgs84 => destination(lat, lon, bearing_deg, distance_km),
            EarthModel::Sphere => spherical_destination(lat, lon, bearing_deg, distance_km),
        }
    }
}

/// Geodesic distance on the WGS-84 ellipsoid, in kilometers.
pub fn geodesic_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Geodesic::distance(Point::new(lon1, lat1), Point::new(lon2, lat2)) / 1000.0
}

/// Solve the direct geodesic problem on WGS-84.
///
/// # Arguments
/// * `lat`, `lon` - Starting position in degrees
/// * `bearing_deg` - Initial azimuth in degrees from true north
/// * `distance_km` - Distance to travel in kilometers
///
/// # Returns
/// (new_lat, new_lon) in degrees
pub fn destination(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
    if distance_km.abs() <= f64::EPSILON {
        return (lat, lon);
    }
    let point = Geodesic::destination(Point::new(lon, lat), bearing_deg, distance_km * 1000.0);
    (point.y(), point.x())
}

/// Great-circle distance in kilometers on the mean-radius sphere.
pub fn haversine_distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    Haversine::distance(Point::new(lon1, lat1), Point::new(lon2, lat2)) / 1000.0
}

/// Initial bearing (forward azimuth) from point 1 to point 2.
/// Returns degrees from true north in `[0, 360)`.
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let delta_lambda = (lon2 - lon1).to_radians();

    let x = delta_lambda.sin() * phi2.cos();
    let y = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Spherical counterpart of [`destination`].
pub fn spherical_destination(lat: f64, lon: f64, bearing_deg: f64, distance_km: f64) -> (f64, f64) {
    if distance_km.abs() <= f64::EPSILON {
        return (lat, lon);
    }
    let point = Haversine::destination(Point::new(lon, lat), bearing_deg, distance_km * 1000.0);
    (point.y(), point.x())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // ~111km between these points (1 degree latitude)
        let dist = haversine_distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((dist - 111.194).abs() < 0.1);
    }

    #[test]
    fn test_haversine_same_point() {
        let dist = haversine_distance_km(51.5719, -0.7760, 51.5719, -0.7760);
        assert!(dist < 1e-6);
    }

    #[test]
    fn geodesic_degree_of_longitude_on_equator() {
        // Equatorial radius 6378.137 km -> 111.3195 km per degree.
        let dist = geodesic_distance_km(0.0, 0.0, 0.0, 1.0);
        assert!((dist - 111.3195).abs() < 0.001, "got {dist}");
    }

    #[test]
    fn geodesic_distance_dublin_to_cary() {
        let dist = geodesic_distance_km(53.3498, -6.2603, 35.7915, -78.7811);
        assert!((5_700.0..5_900.0).contains(&dist), "got {dist}");
    }

    #[test]
    fn bearing_cardinal_directions() {
        assert!(initial_bearing_deg(0.0, 0.0, 1.0, 0.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 0.0, 0.0, 1.0) - 90.0).abs() < 1e-9);
        assert!((initial_bearing_deg(1.0, 0.0, 0.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((initial_bearing_deg(0.0, 1.0, 0.0, 0.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn bearing_is_never_negative() {
        let b = initial_bearing_deg(53.3498, -6.2603, 35.7915, -78.7811);
        assert!((0.0..360.0).contains(&b), "got {b}");
        assert!(b > 270.0, "Dublin to Cary heads west-north-west, got {b}");
    }

    #[test]
    fn destination_round_trips_distance() {
        let (lat, lon) = destination(55.6761, 12.5683, 45.0, 250.0);
        let back = geodesic_distance_km(55.6761, 12.5683, lat, lon);
        assert!((back - 250.0).abs() < 1e-6, "got {back}");
    }

    #[test]
    fn zero_distance_returns_origin() {
        assert_eq!(destination(10.0, 20.0, 123.0, 0.0), (10.0, 20.0));
        assert_eq!(spherical_destination(10.0, 20.0, 123.0, 0.0), (10.0, 20.0));
    }

    #[test]
    fn spherical_destination_matches_haversine() {
        let (lat, lon) = spherical_destination(59.3293, 18.0686, 260.0, 400.0);
        let back = haversine_distance_km(59.3293, 18.0686, lat, lon);
        assert!((back - 400.0).abs() < 1e-6, "got {back}");
    }

    #[test]
    fn earth_model_dispatch() {
        let wgs = EarthModel::Wgs84.distance_km(0.0, 0.0, 0.0, 1.0);
        let sphere = EarthModel::Sphere.distance_km(0.0, 0.0, 0.0, 1.0);
        assert!(wgs > sphere);
        assert_eq!(EarthModel::default(), EarthModel::Wgs84);
    }
}
