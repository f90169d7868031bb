//! The route model: an ordered list of waypoints and the cumulative
//! geodesic distance from the first waypoint to each of them.

use crate::error::RouteError;
use crate::models::Waypoint;
use crate::spatial::EarthModel;

/// Office locations on the challenge route, in travel order.
const DEFAULT_ROUTE: [(&str, f64, f64); 8] = [
    ("Marlow", 51.5719, -0.7760),
    ("Copenhagen", 55.6761, 12.5683),
    ("Helsinki", 60.1695, 24.9354),
    ("Stockholm", 59.3293, 18.0686),
    ("Oslo", 59.9139, 10.7522),
    ("Glasgow", 55.8642, -4.2518),
    ("Dublin", 53.3498, -6.2603),
    ("Cary", 35.7915, -78.7811),
];

/// Waypoints of the default Marlow to Cary route.
pub fn default_route() -> Vec<Waypoint> {
    DEFAULT_ROUTE
        .iter()
        .map(|(name, lat, lon)| Waypoint::new(*name, *lat, *lon))
        .collect()
}

/// Kilometers from waypoint 0 to each waypoint. `table[0] == 0` and the
/// sequence never decreases.
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeDistanceTable(Vec<f64>);

impl CumulativeDistanceTable {
    /// Accumulate segment lengths over consecutive waypoint pairs.
    pub fn build(waypoints: &[Waypoint], model: EarthModel) -> Result<Self, RouteError> {
        if waypoints.len() < 2 {
            return Err(RouteError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let mut table = Vec::with_capacity(waypoints.len());
        table.push(0.0);
        let mut total = 0.0;

        for (index, pair) in waypoints.windows(2).enumerate() {
            let (start, end) = (&pair[0], &pair[1]);
            let segment_km = model.distance_km(start.lat, start.lon, end.lat, end.lon);
            if segment_km.is_nan() || segment_km <= 0.0 {
                return Err(RouteError::CoincidentWaypoints {
                    index: index + 1,
                    name: end.name.clone(),
                });
            }
            total += segment_km;
            table.push(total);
        }

        Ok(Self(table))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Cumulative distance at the final waypoint.
    pub fn total_km(&self) -> f64 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// First segment `i` with `table[i] <= distance_km <= table[i + 1]`.
    ///
    /// A distance equal to an inner waypoint's value resolves to the
    /// segment ending at that waypoint. `None` outside the table.
    pub fn segment_for(&self, distance_km: f64) -> Option<usize> {
        self.0
            .windows(2)
            .position(|bounds| bounds[0] <= distance_km && distance_km <= bounds[1])
    }
}

/// An ordered waypoint list together with its distance table.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    table: CumulativeDistanceTable,
    model: EarthModel,
}

impl Route {
    /// Build a route on the WGS-84 ellipsoid.
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, RouteError> {
        Self::with_model(waypoints, EarthModel::Wgs84)
    }

    pub fn with_model(waypoints: Vec<Waypoint>, model: EarthModel) -> Result<Self, RouteError> {
        if let Some(bad) = waypoints.iter().find(|w| !w.has_valid_coordinates()) {
            return Err(RouteError::InvalidCoordinates {
                name: bad.name.clone(),
                lat: bad.lat,
                lon: bad.lon,
            });
        }

        let table = CumulativeDistanceTable::build(&waypoints, model)?;
        tracing::debug!(
            waypoints = waypoints.len(),
            total_km = table.total_km(),
            "Built route distance table"
        );

        Ok(Self {
            waypoints,
            table,
            model,
        })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn table(&self) -> &CumulativeDistanceTable {
        &self.table
    }

    pub fn model(&self) -> EarthModel {
        self.model
    }

    pub fn total_km(&self) -> f64 {
        self.table.total_km()
    }

    pub fn first(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn last(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// Consecutive waypoint pairs, in travel order.
    pub fn segments(&self) -> impl Iterator<Item = (&Waypoint, &Waypoint)> + '_ {
        self.waypoints.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}
