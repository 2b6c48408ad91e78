use super::ScanCliError;
use crate::model::GeoPoint;
use kdam::tqdm;
use serde::Deserialize;

/// provides the spawnpoints for a scan. freshness and other filtering criteria
/// are the concern of the source.
pub trait PointSource {
    fn read_points(&self) -> Result<Vec<GeoPoint>, ScanCliError>;
}

impl PointSource for Vec<GeoPoint> {
    fn read_points(&self) -> Result<Vec<GeoPoint>, ScanCliError> {
        Ok(self.clone())
    }
}

/// reads spawnpoints from a CSV file with `latitude` and `longitude` columns
/// (or `lat` and `lon`). when the file has an `updated` column of unix timestamps
/// and a max age is set, rows updated longer ago than the max age are dropped,
/// as are rows with no `updated` value.
#[derive(Debug, Clone)]
pub struct CsvPointSource {
    pub filepath: String,
    pub max_age: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SpawnpointRow {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon")]
    longitude: f64,
    #[serde(default)]
    updated: Option<i64>,
}

const UPDATED_COLUMN: &str = "updated";

impl CsvPointSource {
    pub fn new(filepath: &str, max_age: Option<u64>) -> CsvPointSource {
        CsvPointSource {
            filepath: filepath.to_string(),
            max_age,
        }
    }

    /// reads the file, applying the max age relative to `now` in unix seconds.
    pub fn read_points_at(&self, now: i64) -> Result<Vec<GeoPoint>, ScanCliError> {
        let csv_error = |e: csv::Error| ScanCliError::CsvReadError(self.filepath.clone(), e);
        let mut reader = csv::Reader::from_path(&self.filepath).map_err(csv_error)?;
        let has_updated = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .any(|h| h.trim() == UPDATED_COLUMN);

        let cutoff = match (self.max_age, has_updated) {
            (Some(age), true) => Some(now.saturating_sub(i64::try_from(age).unwrap_or(i64::MAX))),
            (Some(_), false) => {
                log::warn!(
                    "{} has no '{UPDATED_COLUMN}' column, spawnpoint age filter is not applied",
                    self.filepath
                );
                None
            }
            (None, _) => None,
        };

        let rows = tqdm!(
            reader.into_deserialize::<SpawnpointRow>(),
            desc = format!("reading {}", self.filepath)
        );
        let mut points = vec![];
        let mut n_stale = 0;
        for row in rows {
            let row = row.map_err(csv_error)?;
            let fresh = match cutoff {
                None => true,
                Some(cutoff) => row.updated.is_some_and(|updated| cutoff < updated),
            };
            if fresh {
                points.push(GeoPoint::new(row.latitude, row.longitude));
            } else {
                n_stale += 1;
            }
        }
        eprintln!();
        if n_stale > 0 {
            log::info!("ignored {n_stale} spawnpoints outside of the max age window");
        }
        log::info!("read {} spawnpoints from {}", points.len(), self.filepath);
        Ok(points)
    }
}

impl PointSource for CsvPointSource {
    fn read_points(&self) -> Result<Vec<GeoPoint>, ScanCliError> {
        self.read_points_at(chrono::Utc::now().timestamp())
    }
}
