//! Team progress loading from the per-date CSV export.

use chrono::NaiveDate;
use r2c_core::ProgressRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PROGRESS_FILE_NAME: &str = "team_progress.csv";

/// Date folders are named `MM_DD_YY`, e.g. `06_12_25`.
pub const DATE_TAG_FORMAT: &str = "%m_%d_%y";

#[derive(Debug, Error)]
pub enum DataError {
    #[error("date tag {0:?} is not in MM_DD_YY format (e.g. 06_12_25)")]
    InvalidDate(String),

    #[error("progress file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed progress data in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Deserialize)]
struct ProgressRow {
    #[serde(rename = "Team_Name")]
    team_name: String,
    #[serde(rename = "Total_Capped_Duration")]
    total_km: f64,
}

/// Parse a `MM_DD_YY` folder name.
pub fn validate_date_tag(tag: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(tag, DATE_TAG_FORMAT).map_err(|_| DataError::InvalidDate(tag.to_string()))
}

/// `<data_dir>/<date>/team_progress.csv`
pub fn progress_path(data_dir: &Path, date: &str) -> PathBuf {
    data_dir.join(date).join(PROGRESS_FILE_NAME)
}

/// Load every team's progress from a CSV file.
pub fn load_progress(path: &Path) -> Result<Vec<ProgressRecord>, DataError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => DataError::NotFound(path.to_path_buf()),
        _ => DataError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let records = read_progress(file).map_err(|source| DataError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("Loaded {} team records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse progress rows from any reader. Columns other than `Team_Name`
/// and `Total_Capped_Duration` are ignored.
pub fn read_progress<R: Read>(reader: R) -> Result<Vec<ProgressRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    reader
        .deserialize::<ProgressRow>()
        .map(|row| row.map(|row| ProgressRecord::new(row.team_name, row.total_km)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SAMPLE: &str = "\
Team_Name,Members,Total_Capped_Duration
Road Runners,5,1234.5
Pedal Pushers, 4 , 9900.0
";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("r2c-data-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn reads_named_columns_and_ignores_the_rest() {
        let records = read_progress(SAMPLE.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                ProgressRecord::new("Road Runners", 1234.5),
                ProgressRecord::new("Pedal Pushers", 9900.0),
            ]
        );
    }

    #[test]
    fn rejects_non_numeric_distance() {
        let bad = "Team_Name,Total_Capped_Duration\nSlowpokes,far\n";
        assert!(read_progress(bad.as_bytes()).is_err());
    }

    #[test]
    fn missing_file_is_an_explicit_error() {
        let dir = scratch_dir("missing");
        let err = load_progress(&progress_path(&dir, "01_01_25")).unwrap_err();
        assert!(matches!(err, DataError::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn loads_from_date_folder() {
        let dir = scratch_dir("load");
        let path = progress_path(&dir, "06_12_25");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, SAMPLE).unwrap();

        let records = load_progress(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert!(path.ends_with("06_12_25/team_progress.csv"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn date_tags() {
        assert_eq!(
            validate_date_tag("06_12_25").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
        );
        assert!(validate_date_tag("2025-06-12").is_err());
        assert!(validate_date_tag("13_01_25").is_err());
    }
}
