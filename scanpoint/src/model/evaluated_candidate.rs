use super::GeoPoint;
use indexmap::IndexSet;

/// a grid candidate that passed coverage evaluation, along with the distinct
/// spawnpoints found within the scan radius.
#[derive(Debug, Clone)]
pub struct EvaluatedCandidate {
    pub location: GeoPoint,
    pub covered: IndexSet<GeoPoint>,
}

impl EvaluatedCandidate {
    pub fn new(location: GeoPoint, covered: IndexSet<GeoPoint>) -> EvaluatedCandidate {
        EvaluatedCandidate { location, covered }
    }
}
