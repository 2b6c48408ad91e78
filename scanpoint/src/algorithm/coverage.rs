use super::haversine;
use crate::model::{EvaluatedCandidate, GeoPoint, Geofence, ScanError};
use indexmap::IndexSet;

/// evaluates one grid candidate against the spawnpoint set.
///
/// # Arguments
///
/// * `candidate` - grid location to evaluate
/// * `points` - spawnpoints, already restricted to distinct points inside the geofence
/// * `geofence` - region the candidate must lie within
/// * `radius` - scan radius in meters
/// * `min_count` - fewest spawnpoints a candidate must cover to be kept
///
/// # Returns
///
/// The candidate with the spawnpoints within `radius`, or None if the candidate lies
/// outside the geofence or covers fewer than `min_count` spawnpoints. An error is
/// returned for a candidate that cannot be evaluated.
pub fn evaluate(
    candidate: &GeoPoint,
    points: &[GeoPoint],
    geofence: &Geofence,
    radius: f64,
    min_count: usize,
) -> Result<Option<EvaluatedCandidate>, ScanError> {
    if !candidate.is_finite() {
        return Err(ScanError::EvaluationFailure(
            *candidate,
            String::from("candidate has a non-finite coordinate"),
        ));
    }
    if !geofence.contains(candidate) {
        return Ok(None);
    }

    let covered: IndexSet<GeoPoint> = points
        .iter()
        .filter(|p| haversine::distance_meters(candidate, p) <= radius)
        .copied()
        .collect();

    if covered.len() < min_count {
        Ok(None)
    } else {
        Ok(Some(EvaluatedCandidate::new(*candidate, covered)))
    }
}
