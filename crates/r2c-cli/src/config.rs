//! Runtime configuration from environment and route files.

use anyhow::{Context, Result};
use r2c_core::progress::DEFAULT_LAP_LENGTH_KM;
use r2c_core::{EarthModel, LapPolicy, Waypoint};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub logo_path: Option<PathBuf>,
    pub lap_length_km: f64,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            data_dir: lookup("R2C_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("Data")),
            logo_path: lookup("R2C_LOGO").map(PathBuf::from),
            lap_length_km: lookup("R2C_LAP_KM")
                .and_then(|s| s.parse().ok())
                .filter(|km: &f64| LapPolicy::with_lap_length(*km).is_ok())
                .unwrap_or(DEFAULT_LAP_LENGTH_KM),
        }
    }
}

/// Parse a `--lap-km` value; same rules as [`LapPolicy::with_lap_length`].
pub fn parse_lap_length(value: &str) -> Result<f64, String> {
    let km: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("{value:?} is not a number"))?;
    LapPolicy::with_lap_length(km).map_err(|e| e.to_string())?;
    Ok(km)
}

/// Parse an `--earth-model` value (`wgs84` or `sphere`).
pub fn parse_earth_model(value: &str) -> Result<EarthModel, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "wgs84" => Ok(EarthModel::Wgs84),
        "sphere" => Ok(EarthModel::Sphere),
        _ => Err(format!("unknown earth model {value:?}, expected wgs84 or sphere")),
    }
}

/// Read a route from a JSON array of `{"name", "lat", "lon"}` objects.
pub fn load_route_file(path: &Path) -> Result<Vec<Waypoint>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read route file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("route file {} is not a JSON waypoint list", path.display()))
}
