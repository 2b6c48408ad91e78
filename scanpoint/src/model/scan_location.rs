use super::GeoPoint;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// a selected scan location. the covered set holds only the spawnpoints this
/// location claimed, which no other selected location shares.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanLocation {
    pub location: GeoPoint,
    pub covered: IndexSet<GeoPoint>,
}

impl ScanLocation {
    pub fn new(location: GeoPoint, covered: IndexSet<GeoPoint>) -> ScanLocation {
        ScanLocation { location, covered }
    }

    pub fn covered_count(&self) -> usize {
        self.covered.len()
    }
}
