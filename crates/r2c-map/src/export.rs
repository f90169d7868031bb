//! Standalone HTML export.

use crate::figure::MapFigure;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const OUTPUT_FILE_NAME: &str = "index.html";
const DIV_ID: &str = "r2c-map";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize figure: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where a map for `date` is written: `index.html` in the working
/// directory when `main`, otherwise next to that date's data.
pub fn output_path(data_dir: &Path, date: &str, main: bool) -> PathBuf {
    if main {
        PathBuf::from(OUTPUT_FILE_NAME)
    } else {
        data_dir.join(date).join(OUTPUT_FILE_NAME)
    }
}

/// Render the figure into a self-contained page that pulls Plotly from
/// its CDN.
pub fn render_html(figure: &MapFigure) -> Result<String, ExportError> {
    let data = script_safe(serde_json::to_string(&figure.data)?);
    let layout = script_safe(serde_json::to_string(&figure.layout)?);
    let config = script_safe(serde_json::to_string(&figure.config)?);

    Ok(format!(
        r#"<html>
<head><meta charset="utf-8" /></head>
<body>
    <div id="{DIV_ID}" class="plotly-graph-div" style="height:100%; width:100%;"></div>
    <script src="{PLOTLY_CDN_URL}" charset="utf-8"></script>
    <script type="text/javascript">
        Plotly.newPlot("{DIV_ID}", {data}, {layout}, {config});
    </script>
</body>
</html>
"#
    ))
}

pub fn write_html(figure: &MapFigure, path: &Path) -> Result<(), ExportError> {
    let html = render_html(figure)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, html).map_err(io_err)?;

    tracing::info!("Wrote map to {}", path.display());
    Ok(())
}

// Tooltips and labels are data; they must never close the script block.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}
