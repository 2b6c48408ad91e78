use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// a WGS84 coordinate pair. identity is value equality on the pair, so two
/// spawnpoints at the same coordinates are the same spawnpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// bit patterns used for equality and hashing. negative zero is folded into
    /// positive zero so that `-0.0 == 0.0` holds here as it does for f64.
    fn key(&self) -> (u64, u64) {
        (normalized_bits(self.latitude), normalized_bits(self.longitude))
    }
}

fn normalized_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        GeoPoint::new(latitude, longitude)
    }
}

/// geo types store x=longitude, y=latitude.
impl From<geo::Coord<f64>> for GeoPoint {
    fn from(value: geo::Coord<f64>) -> Self {
        GeoPoint::new(value.y, value.x)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
