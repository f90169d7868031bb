//! Core data models shared by the route, the interpolator and the renderer.

use serde::{Deserialize, Serialize};

/// A named point anchoring one end of a route segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub name: String,
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude")]
    pub lon: f64,
}

impl Waypoint {
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Finite and inside the usual latitude/longitude ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// One team's cumulative distance, as supplied by the data loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub team_name: String,
    pub distance_km: f64,
}

impl ProgressRecord {
    pub fn new(team_name: impl Into<String>, distance_km: f64) -> Self {
        Self {
            team_name: team_name.into(),
            distance_km,
        }
    }
}

/// A point on the route produced by interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterpolatedPosition {
    pub lat: f64,
    pub lon: f64,
}

impl From<&Waypoint> for InterpolatedPosition {
    fn from(waypoint: &Waypoint) -> Self {
        Self {
            lat: waypoint.lat,
            lon: waypoint.lon,
        }
    }
}
