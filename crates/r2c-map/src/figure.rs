//! Plotly geo figure assembled from a route and placed teams.

use crate::assets::ImageAsset;
use crate::style::MapStyle;
use chrono::NaiveDateTime;
use r2c_core::{Lap, Placement, Route, TeamPlacement, Waypoint};
use serde::Serialize;

pub const TIMESTAMP_FORMAT: &str = "Last updated: %Y-%m-%d %H:%M:%S";

/// Optional page furniture. Both pieces are supplied by the caller so the
/// figure itself stays free of clock and filesystem access.
#[derive(Debug, Clone, Default)]
pub struct Decorations {
    pub logo: Option<ImageAsset>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapFigure {
    pub data: Vec<Trace>,
    pub layout: Layout,
    pub config: PlotConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub mode: &'static str,
    pub lon: Vec<f64>,
    pub lat: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<Font>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<&'static str>,
    pub showlegend: bool,
}

impl Trace {
    fn new(mode: &'static str, points: &[(f64, f64)]) -> Self {
        Self {
            kind: "scattergeo",
            mode,
            lat: points.iter().map(|p| p.0).collect(),
            lon: points.iter().map(|p| p.1).collect(),
            line: None,
            marker: None,
            text: None,
            textfont: None,
            hoverinfo: None,
            showlegend: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Line {
    pub color: String,
    pub dash: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub size: u32,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
    pub color: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Layout {
    pub showlegend: bool,
    pub autosize: bool,
    pub margin: Margin,
    pub dragmode: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<LayoutImage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    pub geo: Geo,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub t: u32,
    pub b: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct LayoutImage {
    pub source: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub sizex: f64,
    pub sizey: f64,
    pub xanchor: &'static str,
    pub yanchor: &'static str,
    pub layer: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub xref: &'static str,
    pub yref: &'static str,
    pub x: f64,
    pub y: f64,
    pub showarrow: bool,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Geo {
    pub showcountries: bool,
    pub countrycolor: String,
    pub showland: bool,
    pub landcolor: String,
    pub showocean: bool,
    pub oceancolor: String,
    pub showcoastlines: bool,
    pub coastlinecolor: String,
    pub coastlinewidth: f64,
    pub fitbounds: &'static str,
    pub resolution: u32,
}

/// Static map: no zoom, no double-click reset, no toolbar.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    pub scroll_zoom: bool,
    pub double_click: bool,
    pub display_mode_bar: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            scroll_zoom: false,
            double_click: false,
            display_mode_bar: false,
        }
    }
}

impl MapFigure {
    /// Route lines first, then city markers with their labels, then one
    /// marker per placed team so teams draw on top.
    pub fn build(route: &Route, placement: &Placement, style: &MapStyle, decorations: &Decorations) -> Self {
        let mut data = Vec::new();
        data.extend(route_lines(route));
        for waypoint in route.waypoints() {
            data.extend(city_traces(waypoint, style));
        }
        data.extend(placement.placed.iter().map(|team| team_marker(team, style)));

        tracing::debug!(
            traces = data.len(),
            teams = placement.placed.len(),
            "Built map figure"
        );

        Self {
            data,
            layout: layout(style, decorations),
            config: PlotConfig::default(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn route_lines(route: &Route) -> impl Iterator<Item = Trace> + '_ {
    route.segments().map(|(start, end)| Trace {
        line: Some(Line {
            color: "black".into(),
            dash: "dot",
            width: None,
        }),
        ..Trace::new("lines", &[(start.lat, start.lon), (end.lat, end.lon)])
    })
}

fn city_traces(waypoint: &Waypoint, style: &MapStyle) -> [Trace; 3] {
    let (dx, dy) = style.label_offset(&waypoint.name);
    let (lat, lon) = (waypoint.lat, waypoint.lon);
    let factor = style.leader_line_factor;

    let marker = Trace {
        marker: Some(Marker {
            size: 8,
            color: "black".into(),
            symbol: Some("diamond"),
        }),
        text: Some(waypoint.name.clone()),
        hoverinfo: Some("text"),
        ..Trace::new("markers", &[(lat, lon)])
    };

    let leader = Trace {
        line: Some(Line {
            color: "black".into(),
            dash: "dot",
            width: Some(1.5),
        }),
        hoverinfo: Some("skip"),
        ..Trace::new("lines", &[(lat, lon), (lat + dy * factor, lon + dx * factor)])
    };

    let label = Trace {
        text: Some(waypoint.name.clone()),
        textfont: Some(Font {
            size: 14,
            color: "black".into(),
        }),
        hoverinfo: Some("skip"),
        ..Trace::new("text", &[(lat + dy, lon + dx)])
    };

    [marker, leader, label]
}

fn team_marker(team: &TeamPlacement, style: &MapStyle) -> Trace {
    let second_lap = team.lap == Lap::Second;
    let color = if second_lap {
        style.second_lap_color.clone()
    } else {
        style.team_marker_color.clone()
    };

    Trace {
        marker: Some(Marker {
            size: 6,
            color,
            symbol: None,
        }),
        text: Some(team_tooltip(team)),
        hoverinfo: Some("text"),
        ..Trace::new("markers", &[(team.position.lat, team.position.lon)])
    }
}

/// `"<team><br><km> km"`, with a second-lap note when applicable.
pub fn team_tooltip(team: &TeamPlacement) -> String {
    let mut tooltip = format!("{}<br>{:.1} km", team.team_name, team.distance_km);
    if team.lap == Lap::Second {
        tooltip.push_str("<br>SECOND LAP");
    }
    tooltip
}

fn layout(style: &MapStyle, decorations: &Decorations) -> Layout {
    let images = decorations
        .logo
        .iter()
        .map(|logo| LayoutImage {
            source: logo.data_uri(),
            xref: "paper",
            yref: "paper",
            x: style.image_position.0,
            y: style.image_position.1,
            sizex: style.image_size,
            sizey: style.image_size,
            xanchor: "center",
            yanchor: "middle",
            layer: "above",
        })
        .collect();

    let annotations = decorations
        .updated_at
        .iter()
        .map(|ts| Annotation {
            text: ts.format(TIMESTAMP_FORMAT).to_string(),
            xref: "paper",
            yref: "paper",
            x: style.timestamp_position.0,
            y: style.timestamp_position.1,
            showarrow: false,
            font: Font {
                size: 12,
                color: "gray".into(),
            },
        })
        .collect();

    Layout {
        showlegend: false,
        autosize: true,
        margin: Margin { l: 0, r: 0, t: 0, b: 0 },
        dragmode: false,
        images,
        annotations,
        geo: Geo {
            showcountries: true,
            countrycolor: style.country_color.clone(),
            showland: true,
            landcolor: style.land_color.clone(),
            showocean: true,
            oceancolor: style.ocean_color.clone(),
            showcoastlines: true,
            coastlinecolor: style.coastline_color.clone(),
            coastlinewidth: 0.3,
            fitbounds: "locations",
            resolution: 50,
        },
    }
}
