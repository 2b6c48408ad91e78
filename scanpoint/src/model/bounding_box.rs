use super::GeoPoint;
use serde::{Deserialize, Serialize};

/// axis-aligned extent in degrees. bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// min/max latitude and longitude over a collection of points, or None if
    /// the collection is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Option<BoundingBox> {
        points.into_iter().fold(None, |acc, p| match acc {
            None => Some(BoundingBox {
                min_lat: p.latitude,
                max_lat: p.latitude,
                min_lon: p.longitude,
                max_lon: p.longitude,
            }),
            Some(bbox) => Some(BoundingBox {
                min_lat: bbox.min_lat.min(p.latitude),
                max_lat: bbox.max_lat.max(p.latitude),
                min_lon: bbox.min_lon.min(p.longitude),
                max_lon: bbox.max_lon.max(p.longitude),
            }),
        })
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        self.min_lat <= point.latitude
            && point.latitude <= self.max_lat
            && self.min_lon <= point.longitude
            && point.longitude <= self.max_lon
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lat [{},{}], lon [{},{}]",
            self.min_lat, self.max_lat, self.min_lon, self.max_lon
        )
    }
}
