use crate::{
    algorithm::grid::{self, DEFAULT_GRID_RESOLUTION_METERS},
    app::ScanCliError,
    model::ScanError,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a scan location search
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct ScanConfiguration {
    /// scan radius in meters
    pub radius: f64,
    /// fewest spawnpoints each selected location must claim
    pub min_spawnpoints: usize,
    /// divides the grid step. larger values produce a finer grid.
    pub grid_density_factor: f64,
    /// grid spacing in meters before applying the density factor
    pub grid_resolution: f64,
    /// worker thread count, or None for the rayon default
    pub parallelism: Option<usize>,
    /// ignore spawnpoints last updated more than this many seconds ago
    pub max_spawnpoint_age: Option<u64>,
    /// show a progress bar while evaluating grid candidates
    pub progress: bool,
}

impl Default for ScanConfiguration {
    fn default() -> Self {
        Self {
            radius: DEFAULT_GRID_RESOLUTION_METERS / 2.0,
            min_spawnpoints: 11,
            grid_density_factor: 1.0,
            grid_resolution: DEFAULT_GRID_RESOLUTION_METERS,
            parallelism: None,
            max_spawnpoint_age: Some(86_400),
            progress: true,
        }
    }
}

impl ScanConfiguration {
    /// checks every field, failing before any computation begins.
    pub fn validate(&self) -> Result<(), ScanError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ScanError::InvalidConfiguration(format!(
                "radius must be a positive number of meters, found {}",
                self.radius
            )));
        }
        if self.min_spawnpoints < 1 {
            return Err(ScanError::InvalidConfiguration(String::from(
                "min_spawnpoints must be at least 1",
            )));
        }
        if self.parallelism == Some(0) {
            return Err(ScanError::InvalidConfiguration(String::from(
                "parallelism must be at least 1",
            )));
        }
        let _ = self.step_degrees()?;
        Ok(())
    }

    /// grid step in degrees derived from the resolution and density factor.
    pub fn step_degrees(&self) -> Result<f64, ScanError> {
        grid::step_degrees(self.grid_resolution, self.grid_density_factor)
    }
}

impl TryFrom<&String> for ScanConfiguration {
    type Error = ScanCliError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ScanCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            toml::from_str(&s).map_err(|e| {
                ScanCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f).map_err(|e| {
                ScanCliError::ConfigurationError(format!("failure reading {f}: {e}"))
            })?;
            serde_json::from_str(&s).map_err(|e| {
                ScanCliError::ConfigurationError(format!("failure decoding {f}: {e}"))
            })
        } else {
            Err(ScanCliError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
