use super::ScanCliError;
use crate::{algorithm::ScanResult, model::GeoPoint};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::Write};

/// consumes the selected scan locations for presentation or storage.
pub trait ResultSink {
    fn write_result(&mut self, result: &ScanResult) -> Result<(), ScanCliError>;
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// human-readable summary
    #[default]
    Console,
    /// one row per location with its spawnpoint count
    Csv,
    /// full locations including their claimed spawnpoints
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Console => write!(f, "console"),
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// creates a sink in the requested format, writing to a new file at `output_file`
/// or to stdout if no file is given.
pub fn build_sink(
    format: OutputFormat,
    output_file: Option<&String>,
    min_spawnpoints: usize,
) -> Result<Box<dyn ResultSink>, ScanCliError> {
    let writer: Box<dyn Write> = match output_file {
        Some(f) => {
            log::info!("writing {format} output to {f}");
            Box::new(File::create(f)?)
        }
        None => Box::new(std::io::stdout()),
    };
    let sink: Box<dyn ResultSink> = match format {
        OutputFormat::Console => Box::new(ConsoleSink::new(writer, min_spawnpoints)),
        OutputFormat::Csv => Box::new(CsvSink::new(writer)),
        OutputFormat::Json => Box::new(JsonSink::new(writer)),
    };
    Ok(sink)
}

pub struct ConsoleSink<W: Write> {
    writer: W,
    min_spawnpoints: usize,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(writer: W, min_spawnpoints: usize) -> ConsoleSink<W> {
        ConsoleSink {
            writer,
            min_spawnpoints,
        }
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn write_result(&mut self, result: &ScanResult) -> Result<(), ScanCliError> {
        writeln!(
            self.writer,
            "Found {} scan locations for collecting at least {} spawnpoints each.",
            result.locations.len(),
            self.min_spawnpoints
        )?;
        for (idx, location) in result.locations.iter().enumerate() {
            writeln!(
                self.writer,
                "Scan Location {}: Latitude {}, Longitude {}, Spawnpoints: {}",
                idx + 1,
                location.location.latitude,
                location.location.longitude,
                location.covered_count()
            )?;
        }
        let uncovered = result.uncovered().len();
        if uncovered > 0 {
            writeln!(
                self.writer,
                "{uncovered} of {} spawnpoints in the geofence are not claimed by any location.",
                result.valid_spawnpoints.len()
            )?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct LocationRow {
    index: usize,
    latitude: f64,
    longitude: f64,
    spawnpoints: usize,
}

pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(writer: W) -> CsvSink<W> {
        CsvSink {
            writer: csv::Writer::from_writer(writer),
        }
    }
}

impl<W: Write> ResultSink for CsvSink<W> {
    fn write_result(&mut self, result: &ScanResult) -> Result<(), ScanCliError> {
        for (idx, location) in result.locations.iter().enumerate() {
            let row = LocationRow {
                index: idx + 1,
                latitude: location.location.latitude,
                longitude: location.location.longitude,
                spawnpoints: location.covered_count(),
            };
            self.writer
                .serialize(row)
                .map_err(ScanCliError::CsvWriteError)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct JsonLocation<'a> {
    index: usize,
    latitude: f64,
    longitude: f64,
    spawnpoints: usize,
    covered: Vec<&'a GeoPoint>,
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    valid_spawnpoints: usize,
    uncovered_spawnpoints: usize,
    grid_size: usize,
    failures: usize,
    locations: Vec<JsonLocation<'a>>,
}

pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> JsonSink<W> {
        JsonSink { writer }
    }
}

impl<W: Write> ResultSink for JsonSink<W> {
    fn write_result(&mut self, result: &ScanResult) -> Result<(), ScanCliError> {
        let locations = result
            .locations
            .iter()
            .enumerate()
            .map(|(idx, location)| JsonLocation {
                index: idx + 1,
                latitude: location.location.latitude,
                longitude: location.location.longitude,
                spawnpoints: location.covered_count(),
                covered: location.covered.iter().collect(),
            })
            .collect();
        let output = JsonOutput {
            valid_spawnpoints: result.valid_spawnpoints.len(),
            uncovered_spawnpoints: result.uncovered().len(),
            grid_size: result.grid_size,
            failures: result.failures,
            locations,
        };
        serde_json::to_writer_pretty(&mut self.writer, &output)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
