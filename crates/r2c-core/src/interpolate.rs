//! Maps a distance traveled onto a point along the route.

use crate::error::InterpolationError;
use crate::models::InterpolatedPosition;
use crate::route::Route;
use crate::spatial::initial_bearing_deg;

/// Read-only view over a [`Route`] answering position queries.
///
/// Holds no state of its own, so one route can serve any number of
/// interpolators across threads.
#[derive(Debug, Clone, Copy)]
pub struct PositionInterpolator<'r> {
    route: &'r Route,
}

impl<'r> PositionInterpolator<'r> {
    pub fn new(route: &'r Route) -> Self {
        Self { route }
    }

    pub fn route(&self) -> &'r Route {
        self.route
    }

    /// Position after `distance_km` kilometers along the route.
    ///
    /// Distances at or past the end of the route clamp to the final
    /// waypoint. A distance equal to a waypoint's cumulative value returns
    /// that waypoint's exact coordinates. Inside a segment the point is
    /// found by projecting from the segment start along the initial bearing
    /// towards the segment end, by the matching fraction of its length.
    ///
    /// # Errors
    /// [`InterpolationError::InvalidDistance`] for negative or non-finite input.
    pub fn interpolate(&self, distance_km: f64) -> Result<InterpolatedPosition, InterpolationError> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(InterpolationError::InvalidDistance(distance_km));
        }

        let table = self.route.table().as_slice();
        let waypoints = self.route.waypoints();

        if distance_km >= self.route.total_km() {
            return Ok(self.route.last().into());
        }

        let Some(index) = self.route.table().segment_for(distance_km) else {
            return Ok(self.route.last().into());
        };

        let start = &waypoints[index];
        let end = &waypoints[index + 1];
        let (d_start, d_end) = (table[index], table[index + 1]);

        // Boundary hits resolve to the lower segment; answer with its end waypoint.
        if distance_km >= d_end {
            return Ok(end.into());
        }

        let span = d_end - d_start;
        let frac = if span > 0.0 {
            (distance_km - d_start) / span
        } else {
            0.0
        };
        if frac <= 0.0 {
            return Ok(start.into());
        }

        let model = self.route.model();
        let bearing = initial_bearing_deg(start.lat, start.lon, end.lat, end.lon);
        let segment_length_km = model.distance_km(start.lat, start.lon, end.lat, end.lon);
        let along_km = frac * segment_length_km;
        let (lat, lon) = model.destination(start.lat, start.lon, bearing, along_km);

        Ok(InterpolatedPosition { lat, lon })
    }
}

impl Route {
    pub fn interpolator(&self) -> PositionInterpolator<'_> {
        PositionInterpolator::new(self)
    }

    /// Shorthand for `self.interpolator().interpolate(distance_km)`.
    pub fn interpolate(&self, distance_km: f64) -> Result<InterpolatedPosition, InterpolationError> {
        self.interpolator().interpolate(distance_km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;
    use crate::route::default_route;
    use crate::spatial::{geodesic_distance_km, EarthModel};

    const TOL_DEG: f64 = 1e-6;

    fn close(pos: InterpolatedPosition, lat: f64, lon: f64, tol: f64) -> bool {
        (pos.lat - lat).abs() < tol && (pos.lon - lon).abs() < tol
    }

    fn equator() -> Route {
        Route::new(vec![Waypoint::new("A", 0.0, 0.0), Waypoint::new("B", 0.0, 1.0)]).unwrap()
    }

    #[test]
    fn halfway_along_the_equator() {
        let pos = equator().interpolate(55.595).unwrap();
        assert!(close(pos, 0.0, 0.5, 0.01), "got {pos:?}");
    }

    #[test]
    fn exact_midpoint_uses_segment_fraction() {
        let route = equator();
        let pos = route.interpolate(route.total_km() / 2.0).unwrap();
        assert!(close(pos, 0.0, 0.5, 1e-9), "got {pos:?}");
    }

    #[test]
    fn zero_distance_is_first_waypoint() {
        let route = Route::new(default_route()).unwrap();
        let pos = route.interpolate(0.0).unwrap();
        assert_eq!(pos, InterpolatedPosition { lat: 51.5719, lon: -0.7760 });
    }

    #[test]
    fn boundaries_return_waypoints() {
        let route = Route::new(default_route()).unwrap();
        for (waypoint, &d) in route.waypoints().iter().zip(route.table().as_slice()) {
            let pos = route.interpolate(d).unwrap();
            assert!(
                close(pos, waypoint.lat, waypoint.lon, TOL_DEG),
                "{} at {d} km gave {pos:?}",
                waypoint.name
            );
        }
    }

    #[test]
    fn past_the_end_clamps_to_last_waypoint() {
        let route = Route::new(default_route()).unwrap();
        let pos = route.interpolate(route.total_km() + 500.0).unwrap();
        assert_eq!(pos, InterpolatedPosition { lat: 35.7915, lon: -78.7811 });
    }

    #[test]
    fn negative_and_non_finite_distances_fail() {
        let route = equator();
        assert_eq!(
            route.interpolate(-0.1),
            Err(InterpolationError::InvalidDistance(-0.1))
        );
        assert!(route.interpolate(f64::NAN).is_err());
        assert!(route.interpolate(f64::INFINITY).is_err());
    }

    #[test]
    fn moving_forward_moves_away_from_segment_start() {
        let route = Route::new(default_route()).unwrap();
        let table = route.table().as_slice();
        // Dublin -> Cary, the long transatlantic leg.
        let (d0, d1) = (table[6], table[7]);
        let dublin = &route.waypoints()[6];

        let mut previous = 0.0;
        for step in 1..20 {
            let d = d0 + (d1 - d0) * step as f64 / 20.0;
            let pos = route.interpolate(d).unwrap();
            let from_start = geodesic_distance_km(dublin.lat, dublin.lon, pos.lat, pos.lon);
            assert!(from_start > previous, "step {step}: {from_start} <= {previous}");
            previous = from_start;
        }
    }

    #[test]
    fn midpoint_is_half_a_segment_from_its_start() {
        let route = Route::new(default_route()).unwrap();
        let table = route.table().as_slice();
        for (i, (start, end)) in route.segments().enumerate() {
            let mid = (table[i] + table[i + 1]) / 2.0;
            let pos = route.interpolate(mid).unwrap();
            let half = geodesic_distance_km(start.lat, start.lon, end.lat, end.lon) / 2.0;
            let back = geodesic_distance_km(start.lat, start.lon, pos.lat, pos.lon);
            assert!((back - half).abs() < 1e-6, "segment {i}: {back} vs {half}");
        }
    }

    #[test]
    fn sphere_model_lands_on_segment_end() {
        let route = Route::with_model(default_route(), EarthModel::Sphere).unwrap();
        let table = route.table().as_slice();
        let almost = table[2] - 1e-9;
        let helsinki = &route.waypoints()[2];
        let pos = route.interpolate(almost).unwrap();
        assert!(close(pos, helsinki.lat, helsinki.lon, 1e-6), "got {pos:?}");
    }

    #[test]
    fn repeated_queries_are_identical() {
        let route = Route::new(default_route()).unwrap();
        let interpolator = route.interpolator();
        let a = interpolator.interpolate(4_321.0).unwrap();
        let b = interpolator.interpolate(4_321.0).unwrap();
        assert_eq!(a, b);
    }
}
