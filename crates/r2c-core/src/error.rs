//! Error types for route construction and position interpolation.

use thiserror::Error;

/// Raised while building a [`Route`](crate::Route). Fatal to a render run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("route needs at least 2 waypoints, got {count}")]
    TooFewWaypoints { count: usize },

    #[error("waypoint {index} ({name}) coincides with the waypoint before it")]
    CoincidentWaypoints { index: usize, name: String },

    #[error("waypoint {name} has invalid coordinates ({lat}, {lon})")]
    InvalidCoordinates { name: String, lat: f64, lon: f64 },
}

/// Raised per query by the [`PositionInterpolator`](crate::PositionInterpolator).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpolationError {
    #[error("distance must be a finite, non-negative number of km, got {0}")]
    InvalidDistance(f64),
}

/// Raised when a lap length is zero, negative or not a number.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("lap length must be a finite, positive number of km, got {0}")]
pub struct InvalidLapLength(pub f64);
