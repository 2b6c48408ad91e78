use crate::model::ScanError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanCliError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("scan failed: {source}")]
    ScanError {
        #[from]
        source: ScanError,
    },
    #[error("failure reading CSV file {0}: {1}")]
    CsvReadError(String, csv::Error),
    #[error("failure writing CSV output: {0}")]
    CsvWriteError(csv::Error),
    #[error("unable to deserialize WKT into geofence: {0}")]
    InvalidWkt(String),
    #[error("failure reading or writing file: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
