//! R2C CLI - renders the Road to Cary progress map.
//!
//! The `r2c-map` binary is a thin wrapper around [`render_map`].

pub mod config;
pub mod render;

pub use config::{load_route_file, parse_earth_model, parse_lap_length, Config};
pub use render::{render_map, RenderOptions, RenderSummary};
