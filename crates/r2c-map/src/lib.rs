//! Rendering side of the Road to Cary map.
//!
//! Loads team progress, assembles a Plotly geo figure around the route and
//! the placed teams, and exports it as a standalone HTML page.

pub mod assets;
pub mod data;
pub mod export;
pub mod figure;
pub mod style;

pub use assets::{AssetError, ImageAsset};
pub use data::{load_progress, progress_path, validate_date_tag, DataError};
pub use export::{output_path, render_html, write_html, ExportError};
pub use figure::{Decorations, MapFigure};
pub use style::MapStyle;
