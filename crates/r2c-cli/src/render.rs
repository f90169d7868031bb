//! One full map build: route, data, placement, figure, export.

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use r2c_core::{place_teams, EarthModel, LapPolicy, Route, Waypoint};
use r2c_map::{
    load_progress, output_path, progress_path, validate_date_tag, write_html, Decorations,
    ImageAsset, MapFigure, MapStyle,
};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// `MM_DD_YY` folder under `data_dir`
    pub date: String,
    pub data_dir: PathBuf,
    pub waypoints: Vec<Waypoint>,
    pub earth_model: EarthModel,
    pub lap_policy: LapPolicy,
    pub logo_path: Option<PathBuf>,
    pub updated_at: Option<NaiveDateTime>,
    /// Explicit output file; otherwise derived from `main`
    pub output: Option<PathBuf>,
    pub main: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub placed: usize,
    pub skipped: usize,
    pub second_lap: usize,
}

pub fn render_map(options: &RenderOptions) -> Result<RenderSummary> {
    validate_date_tag(&options.date)?;

    let route = Route::with_model(options.waypoints.clone(), options.earth_model)
        .context("invalid route configuration")?;
    tracing::info!(
        "Route has {} waypoints over {:.1} km",
        route.waypoints().len(),
        route.total_km()
    );

    let records = load_progress(&progress_path(&options.data_dir, &options.date))?;
    let placement = place_teams(&route, &options.lap_policy, &records);

    // A missing logo only costs the decoration, not the map.
    let logo = match &options.logo_path {
        Some(path) => match ImageAsset::load(path) {
            Ok(asset) => Some(asset),
            Err(e) => {
                tracing::warn!("Rendering without logo: {}", e);
                None
            }
        },
        None => None,
    };

    let decorations = Decorations {
        logo,
        updated_at: options.updated_at,
    };
    let figure = MapFigure::build(&route, &placement, &MapStyle::default(), &decorations);

    let output = options
        .output
        .clone()
        .unwrap_or_else(|| output_path(&options.data_dir, &options.date, options.main));
    write_html(&figure, &output)?;

    Ok(RenderSummary {
        output,
        placed: placement.placed.len(),
        skipped: placement.skipped.len(),
        second_lap: placement.second_lap_teams().count(),
    })
}
