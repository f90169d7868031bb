//! Second-lap handling and batch placement of teams on the route.

use crate::error::{InterpolationError, InvalidLapLength};
use crate::models::{InterpolatedPosition, ProgressRecord};
use crate::route::Route;
use serde::{Deserialize, Serialize};

/// Distance after which a team counts as being on its second lap.
pub const DEFAULT_LAP_LENGTH_KM: f64 = 9_800.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lap {
    #[default]
    First,
    Second,
}

/// How raw traveled distances are folded back onto the route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapPolicy {
    /// `None` disables lap handling entirely.
    lap_length_km: Option<f64>,
}

impl Default for LapPolicy {
    fn default() -> Self {
        Self {
            lap_length_km: Some(DEFAULT_LAP_LENGTH_KM),
        }
    }
}

impl LapPolicy {
    /// Lap handling with the given threshold, which must be finite and
    /// strictly positive.
    pub fn with_lap_length(lap_length_km: f64) -> Result<Self, InvalidLapLength> {
        if !lap_length_km.is_finite() || lap_length_km <= 0.0 {
            return Err(InvalidLapLength(lap_length_km));
        }
        Ok(Self {
            lap_length_km: Some(lap_length_km),
        })
    }

    pub fn disabled() -> Self {
        Self {
            lap_length_km: None,
        }
    }

    pub fn lap_length_km(&self) -> Option<f64> {
        self.lap_length_km
    }

    /// Normalize a raw distance for the interpolator.
    ///
    /// Above the lap length the threshold is subtracted once and the team is
    /// flagged [`Lap::Second`]. Anything still past the route end is left for
    /// the interpolator to clamp.
    pub fn normalize(&self, raw_km: f64) -> (f64, Lap) {
        match self.lap_length_km {
            Some(lap) if raw_km > lap => (raw_km - lap, Lap::Second),
            _ => (raw_km, Lap::First),
        }
    }
}

/// A team placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamPlacement {
    pub team_name: String,
    /// Distance after lap normalization
    pub distance_km: f64,
    pub lap: Lap,
    pub position: InterpolatedPosition,
}

/// A record that could not be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    pub team_name: String,
    pub raw_distance_km: f64,
    pub error: InterpolationError,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Placement {
    pub placed: Vec<TeamPlacement>,
    pub skipped: Vec<SkippedRecord>,
}

impl Placement {
    pub fn second_lap_teams(&self) -> impl Iterator<Item = &TeamPlacement> {
        self.placed.iter().filter(|t| t.lap == Lap::Second)
    }
}

/// Place every record on the route.
///
/// Records the interpolator rejects are logged and collected in
/// [`Placement::skipped`]; the rest of the batch is unaffected.
pub fn place_teams(route: &Route, policy: &LapPolicy, records: &[ProgressRecord]) -> Placement {
    let interpolator = route.interpolator();
    let mut placement = Placement::default();

    for record in records {
        let (distance_km, lap) = policy.normalize(record.distance_km);
        match interpolator.interpolate(distance_km) {
            Ok(position) => placement.placed.push(TeamPlacement {
                team_name: record.team_name.clone(),
                distance_km,
                lap,
                position,
            }),
            Err(error) => {
                tracing::warn!(
                    team = %record.team_name,
                    distance_km = record.distance_km,
                    "Skipping team marker: {}",
                    error
                );
                placement.skipped.push(SkippedRecord {
                    team_name: record.team_name.clone(),
                    raw_distance_km: record.distance_km,
                    error,
                });
            }
        }
    }

    tracing::debug!(
        placed = placement.placed.len(),
        skipped = placement.skipped.len(),
        "Placed teams on route"
    );
    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Waypoint;

    fn route() -> Route {
        Route::new(vec![
            Waypoint::new("A", 0.0, 0.0),
            Waypoint::new("B", 0.0, 1.0),
            Waypoint::new("C", 0.0, 2.0),
        ])
        .unwrap()
    }

    #[test]
    fn normalize_below_threshold_is_untouched() {
        let policy = LapPolicy::default();
        assert_eq!(policy.normalize(9_800.0), (9_800.0, Lap::First));
        assert_eq!(policy.normalize(12.5), (12.5, Lap::First));
    }

    #[test]
    fn normalize_above_threshold_subtracts_once() {
        let policy = LapPolicy::with_lap_length(100.0).unwrap();
        assert_eq!(policy.normalize(150.0), (50.0, Lap::Second));
        assert_eq!(policy.normalize(250.0), (150.0, Lap::Second));
    }

    #[test]
    fn lap_length_must_be_finite_and_positive() {
        for bad in [-5.0, 0.0, -0.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(LapPolicy::with_lap_length(bad).is_err(), "accepted {bad}");
        }
        assert_eq!(
            LapPolicy::with_lap_length(-5.0),
            Err(InvalidLapLength(-5.0))
        );
        let policy = LapPolicy::with_lap_length(0.5).unwrap();
        assert_eq!(policy.lap_length_km(), Some(0.5));
        assert_eq!(policy.normalize(0.25), (0.25, Lap::First));
    }

    #[test]
    fn disabled_policy_never_flags_second_lap() {
        assert_eq!(LapPolicy::disabled().normalize(1e6), (1e6, Lap::First));
    }

    #[test]
    fn place_teams_keeps_good_records_and_skips_bad_ones() {
        let route = route();
        let records = vec![
            ProgressRecord::new("Walkers", 0.0),
            ProgressRecord::new("Broken", -5.0),
            ProgressRecord::new("Riders", 250.0),
        ];
        let placement = place_teams(&route, &LapPolicy::with_lap_length(200.0).unwrap(), &records);

        assert_eq!(placement.placed.len(), 2);
        assert_eq!(placement.placed[0].team_name, "Walkers");
        assert_eq!(placement.placed[0].lap, Lap::First);
        assert_eq!(placement.placed[0].position, InterpolatedPosition { lat: 0.0, lon: 0.0 });

        let riders = &placement.placed[1];
        assert_eq!(riders.lap, Lap::Second);
        assert_eq!(riders.distance_km, 50.0);
        assert!((riders.position.lon - 50.0 / 111.3195).abs() < 1e-3);

        assert_eq!(placement.skipped.len(), 1);
        assert_eq!(placement.skipped[0].team_name, "Broken");
        assert_eq!(
            placement.skipped[0].error,
            InterpolationError::InvalidDistance(-5.0)
        );
        assert_eq!(placement.second_lap_teams().count(), 1);
    }

    #[test]
    fn lap_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Lap::Second).unwrap(), "\"second\"");
    }
}
