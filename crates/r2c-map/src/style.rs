//! Presentation constants for the map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label offset used for cities without an entry in [`MapStyle::label_offsets`].
pub const DEFAULT_LABEL_OFFSET: (f64, f64) = (0.0, 0.6);

/// Colors, offsets and paper positions used when building a figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapStyle {
    pub team_marker_color: String,
    pub second_lap_color: String,
    pub country_color: String,
    pub land_color: String,
    pub ocean_color: String,
    pub coastline_color: String,
    /// Per-city label offset as (degrees lon, degrees lat)
    pub label_offsets: HashMap<String, (f64, f64)>,
    /// Fraction of the label offset the leader line spans
    pub leader_line_factor: f64,
    /// Logo position in paper coordinates
    pub image_position: (f64, f64),
    pub image_size: f64,
    /// Timestamp position in paper coordinates
    pub timestamp_position: (f64, f64),
}

impl Default for MapStyle {
    fn default() -> Self {
        let label_offsets = [
            ("Marlow", (2.5, -3.5)),
            ("Copenhagen", (0.0, -3.5)),
            ("Helsinki", (0.0, 5.0)),
            ("Stockholm", (0.0, 4.0)),
            ("Oslo", (-0.5, 2.0)),
            ("Glasgow", (0.0, 3.0)),
            ("Dublin", (-2.0, -3.0)),
            ("Cary", (-1.5, 3.0)),
        ]
        .into_iter()
        .map(|(city, offset)| (city.to_string(), offset))
        .collect();

        Self {
            team_marker_color: "Blue".into(),
            second_lap_color: "green".into(),
            country_color: "#D9D9D9".into(),
            land_color: "#F2F2F2".into(),
            ocean_color: "#C4DEFD".into(),
            coastline_color: "darkgray".into(),
            label_offsets,
            leader_line_factor: 0.7,
            image_position: (0.905, 0.125),
            image_size: 0.2,
            timestamp_position: (0.25, 0.05),
        }
    }
}

impl MapStyle {
    pub fn label_offset(&self, city: &str) -> (f64, f64) {
        self.label_offsets
            .get(city)
            .copied()
            .unwrap_or(DEFAULT_LABEL_OFFSET)
    }
}
