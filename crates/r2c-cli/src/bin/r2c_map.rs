//! Render the Road to Cary progress map for one day's data.

use anyhow::Result;
use clap::Parser;
use r2c_cli::{
    load_route_file, parse_earth_model, parse_lap_length, render_map, Config, RenderOptions,
};
use r2c_core::{default_route, EarthModel, LapPolicy};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Build the team progress map and export it as HTML
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Data folder name in MM_DD_YY format, e.g. 06_12_25
    #[arg(long)]
    date: String,

    /// Root folder holding one sub-folder per date [env: R2C_DATA_DIR]
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Logo image to embed in the corner of the map [env: R2C_LOGO]
    #[arg(long)]
    logo: Option<PathBuf>,

    /// JSON route file; the built-in Marlow to Cary route otherwise
    #[arg(long)]
    route: Option<PathBuf>,

    /// Distance after which a team is on its second lap [env: R2C_LAP_KM]
    #[arg(long, conflicts_with = "no_laps", value_parser = parse_lap_length)]
    lap_km: Option<f64>,

    /// Earth model for distances and projection: wgs84 or sphere
    #[arg(long, default_value = "wgs84", value_parser = parse_earth_model)]
    earth_model: EarthModel,

    /// Disable second-lap handling
    #[arg(long)]
    no_laps: bool,

    /// Write to ./index.html instead of the date folder
    #[arg(long)]
    main: bool,

    /// Explicit output path (overrides --main)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("r2c_map=info".parse()?)
                .add_directive("r2c_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();

    let waypoints = match &args.route {
        Some(path) => load_route_file(path)?,
        None => default_route(),
    };

    let lap_policy = if args.no_laps {
        LapPolicy::disabled()
    } else {
        LapPolicy::with_lap_length(args.lap_km.unwrap_or(config.lap_length_km))?
    };

    let options = RenderOptions {
        date: args.date,
        data_dir: args.data_dir.unwrap_or(config.data_dir),
        waypoints,
        earth_model: args.earth_model,
        lap_policy,
        logo_path: args.logo.or(config.logo_path),
        updated_at: Some(chrono::Local::now().naive_local()),
        output: args.out,
        main: args.main,
    };

    let summary = render_map(&options)?;
    tracing::info!(
        "Placed {} teams ({} on second lap, {} skipped) -> {}",
        summary.placed,
        summary.second_lap,
        summary.skipped,
        summary.output.display()
    );
    Ok(())
}
