mod bounding_box;
mod evaluated_candidate;
mod geo_point;
mod geofence;
mod scan_error;
mod scan_location;

pub use bounding_box::BoundingBox;
pub use evaluated_candidate::EvaluatedCandidate;
pub use geo_point::GeoPoint;
pub use geofence::{within_polygon, Geofence};
pub use scan_error::ScanError;
pub use scan_location::ScanLocation;
