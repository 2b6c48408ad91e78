use super::{build_sink, read_geofence, CsvPointSource, OutputFormat, PointSource, ScanCliError};
use crate::{
    algorithm::{find_scan_locations, grid},
    config::ScanConfiguration,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

/// command line tool for finding scan locations that cover spawnpoints within a geofence
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ScanApp {
    #[command(subcommand)]
    pub op: ScanOperation,
}

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ScanOperation {
    /// select scan locations for a set of spawnpoints and a geofence
    Run {
        /// CSV file of spawnpoints with latitude,longitude columns and an optional updated column
        #[arg(long)]
        spawnpoints_file: String,
        /// WKT POLYGON file, or CSV file of latitude,longitude vertices
        #[arg(long)]
        geofence_file: String,
        /// TOML or JSON file with scan parameters
        #[arg(long)]
        configuration_file: Option<String>,
        /// scan radius in meters, overrides the configuration file
        #[arg(long)]
        radius: Option<f64>,
        /// fewest spawnpoints each location must claim, overrides the configuration file
        #[arg(long)]
        min_spawnpoints: Option<usize>,
        /// larger values produce a finer grid, overrides the configuration file
        #[arg(long)]
        grid_density_factor: Option<f64>,
        /// worker thread count, overrides the configuration file
        #[arg(long)]
        parallelism: Option<usize>,
        /// file to write the result to. writes to stdout if omitted.
        #[arg(long)]
        output_file: Option<String>,
        /// output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Console)]
        format: OutputFormat,
        /// hide the grid evaluation progress bar
        #[arg(long, default_value_t = false)]
        no_progress: bool,
    },
    /// report the candidate grid for a geofence without evaluating it
    Grid {
        /// WKT POLYGON file, or CSV file of latitude,longitude vertices
        #[arg(long)]
        geofence_file: String,
        /// larger values produce a finer grid
        #[arg(long, default_value_t = 1.0)]
        grid_density_factor: f64,
        /// grid spacing in meters before applying the density factor
        #[arg(long, default_value_t = grid::DEFAULT_GRID_RESOLUTION_METERS)]
        grid_resolution: f64,
    },
}

impl ScanOperation {
    pub fn run(&self) -> Result<(), ScanCliError> {
        match self {
            ScanOperation::Run {
                spawnpoints_file,
                geofence_file,
                configuration_file,
                radius,
                min_spawnpoints,
                grid_density_factor,
                parallelism,
                output_file,
                format,
                no_progress,
            } => {
                let mut conf = match configuration_file {
                    None => Ok(ScanConfiguration::default()),
                    Some(f) => {
                        log::info!("reading scan configuration from {f}");
                        ScanConfiguration::try_from(f)
                    }
                }?;
                if let Some(r) = radius {
                    conf.radius = *r;
                }
                if let Some(n) = min_spawnpoints {
                    conf.min_spawnpoints = *n;
                }
                if let Some(d) = grid_density_factor {
                    conf.grid_density_factor = *d;
                }
                if parallelism.is_some() {
                    conf.parallelism = *parallelism;
                }
                if *no_progress {
                    conf.progress = false;
                }
                conf.validate()?;
                log::debug!("scan configuration: {conf:?}");

                let geofence = read_geofence(geofence_file)?;
                let source = CsvPointSource::new(spawnpoints_file, conf.max_spawnpoint_age);
                let spawnpoints = source.read_points()?;

                let result = find_scan_locations(&spawnpoints, &geofence, &conf)?;
                let mut sink = build_sink(*format, output_file.as_ref(), conf.min_spawnpoints)?;
                sink.write_result(&result)
            }
            ScanOperation::Grid {
                geofence_file,
                grid_density_factor,
                grid_resolution,
            } => {
                let geofence = read_geofence(geofence_file)?;
                let step = grid::step_degrees(*grid_resolution, *grid_density_factor)?;
                let bbox = geofence.bounding_box();
                let size = grid::grid_size(bbox, step)?;
                println!("extent: {bbox}");
                println!("step (degrees): {step}");
                println!("grid candidates: {size}");
                Ok(())
            }
        }
    }
}
