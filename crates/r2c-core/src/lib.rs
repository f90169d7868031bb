pub mod error;
pub mod interpolate;
pub mod models;
pub mod progress;
pub mod route;
pub mod spatial;

pub use error::{InterpolationError, InvalidLapLength, RouteError};
pub use interpolate::PositionInterpolator;
pub use models::{InterpolatedPosition, ProgressRecord, Waypoint};
pub use progress::{place_teams, Lap, LapPolicy, Placement, SkippedRecord, TeamPlacement};
pub use route::{default_route, CumulativeDistanceTable, Route};
pub use spatial::{geodesic_distance_km, initial_bearing_deg, EarthModel};
