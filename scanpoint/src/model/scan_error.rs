use super::GeoPoint;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("invalid geofence: {0}")]
    InvalidGeofence(String),
    #[error("invalid scan configuration: {0}")]
    InvalidConfiguration(String),
    #[error("failure evaluating candidate {0}: {1}")]
    EvaluationFailure(GeoPoint, String),
    #[error("failure building scan thread pool: {0}")]
    ThreadPoolError(String),
    #[error("{0}")]
    InternalError(String),
}
