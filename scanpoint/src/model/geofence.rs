use super::{BoundingBox, GeoPoint, ScanError};
use itertools::Itertools;

/// a closed polygonal region given by its ordered vertices. the ring is closed
/// implicitly, a repeated closing vertex is dropped on construction. the polygon
/// is assumed to be simple, this is not validated.
///
/// containment uses an open boundary: points lying exactly on an edge or a vertex
/// are not contained by the geofence.
#[derive(Debug, Clone)]
pub struct Geofence {
    vertices: Vec<GeoPoint>,
    bbox: BoundingBox,
}

impl Geofence {
    pub fn new(vertices: Vec<GeoPoint>) -> Result<Geofence, ScanError> {
        if let Some(bad) = vertices.iter().find(|v| !v.is_finite()) {
            return Err(ScanError::InvalidGeofence(format!(
                "vertex {bad} has a non-finite coordinate"
            )));
        }
        let mut vertices = vertices;
        while vertices.len() > 1 && vertices.first() == vertices.last() {
            let _ = vertices.pop();
        }
        let n_distinct = vertices.iter().unique().count();
        if n_distinct < 3 {
            return Err(ScanError::InvalidGeofence(format!(
                "polygon requires at least 3 distinct vertices, found {n_distinct}"
            )));
        }
        if signed_area(&vertices) == 0.0 {
            return Err(ScanError::InvalidGeofence(String::from(
                "polygon is degenerate, its vertices enclose no area",
            )));
        }
        let bbox = BoundingBox::from_points(vertices.iter()).ok_or_else(|| {
            ScanError::InternalError(String::from("cannot get bounds of empty geofence"))
        })?;
        Ok(Geofence { vertices, bbox })
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// extent of the geofence vertices. this is a superset of the polygon area.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bbox
    }

    /// point-in-polygon test by ray casting (even-odd rule) after an early
    /// rejection against the bounding box.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        if !point.is_finite() || !self.bbox.contains(point) {
            return false;
        }
        if self.edges().any(|(a, b)| on_segment(point, a, b)) {
            return false;
        }
        let (px, py) = (point.longitude, point.latitude);
        let mut inside = false;
        for (a, b) in self.edges() {
            let (ax, ay) = (a.longitude, a.latitude);
            let (bx, by) = (b.longitude, b.latitude);
            if (ay > py) != (by > py) {
                let x_intersect = ax + (py - ay) * (bx - ax) / (by - ay);
                if px < x_intersect {
                    inside = !inside;
                }
            }
        }
        inside
    }

    fn edges(&self) -> impl Iterator<Item = (&GeoPoint, &GeoPoint)> {
        self.vertices.iter().circular_tuple_windows()
    }
}

/// reads the exterior ring of a WKT-style polygon (x=longitude, y=latitude).
/// interior rings are not supported and are ignored.
impl TryFrom<&geo::Polygon<f64>> for Geofence {
    type Error = ScanError;

    fn try_from(polygon: &geo::Polygon<f64>) -> Result<Self, Self::Error> {
        if !polygon.interiors().is_empty() {
            log::warn!(
                "geofence polygon has {} interior rings which will be ignored",
                polygon.interiors().len()
            );
        }
        let vertices = polygon
            .exterior()
            .coords()
            .map(|c| GeoPoint::from(*c))
            .collect_vec();
        Geofence::new(vertices)
    }
}

/// free-function form of [`Geofence::contains`].
pub fn within_polygon(point: &GeoPoint, geofence: &Geofence) -> bool {
    geofence.contains(point)
}

/// shoelace formula, in squared degrees.
fn signed_area(vertices: &[GeoPoint]) -> f64 {
    let twice_area: f64 = vertices
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.longitude * b.latitude - b.longitude * a.latitude)
        .sum();
    twice_area / 2.0
}

/// true if p lies exactly on the segment [a, b].
fn on_segment(p: &GeoPoint, a: &GeoPoint, b: &GeoPoint) -> bool {
    let cross = (b.longitude - a.longitude) * (p.latitude - a.latitude)
        - (b.latitude - a.latitude) * (p.longitude - a.longitude);
    cross == 0.0
        && a.longitude.min(b.longitude) <= p.longitude
        && p.longitude <= a.longitude.max(b.longitude)
        && a.latitude.min(b.latitude) <= p.latitude
        && p.latitude <= a.latitude.max(b.latitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn unit_square() -> Geofence {
        Geofence::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 0.0),
        ])
        .expect("test invariant failed: unit square is a valid geofence")
    }

    #[test]
    fn test_contains_interior_point() {
        let fence = unit_square();
        assert!(fence.contains(&GeoPoint::new(0.5, 0.5)));
        assert!(fence.contains(&GeoPoint::new(0.001, 0.999)));
    }

    #[test]
    fn test_rejects_exterior_point() {
        let fence = unit_square();
        assert!(!fence.contains(&GeoPoint::new(1.5, 0.5)));
        assert!(!fence.contains(&GeoPoint::new(0.5, -0.0001)));
        assert!(!fence.contains(&GeoPoint::new(f64::NAN, 0.5)));
    }

    #[test]
    fn test_boundary_is_open() {
        let fence = unit_square();
        // vertices
        assert!(!fence.contains(&GeoPoint::new(0.0, 0.0)));
        assert!(!fence.contains(&GeoPoint::new(1.0, 1.0)));
        // edges
        assert!(!fence.contains(&GeoPoint::new(0.0, 0.5)));
        assert!(!fence.contains(&GeoPoint::new(0.5, 1.0)));
        assert!(!within_polygon(&GeoPoint::new(1.0, 0.25), &fence));
    }

    #[test]
    fn test_concave_polygon() {
        // an L shape with the notch in the upper right quadrant
        let fence = Geofence::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(2.0, 0.0),
            GeoPoint::new(2.0, 1.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(0.0, 2.0),
        ])
        .expect("test invariant failed: L shape is a valid geofence");
        assert!(fence.contains(&GeoPoint::new(0.5, 0.5)));
        assert!(fence.contains(&GeoPoint::new(1.5, 0.5)));
        assert!(fence.contains(&GeoPoint::new(0.5, 1.5)));
        assert!(!fence.contains(&GeoPoint::new(1.5, 1.5)));
    }

    #[test]
    fn test_closing_vertex_is_dropped() {
        let fence = Geofence::new(vec![
            GeoPoint::new(44.371398, -78.788005),
            GeoPoint::new(44.297078, -78.744307),
            GeoPoint::new(44.30785, -78.67876),
            GeoPoint::new(44.388749, -78.721002),
            GeoPoint::new(44.371398, -78.788005),
        ])
        .expect("test invariant failed: closed ring is a valid geofence");
        assert_eq!(fence.vertices().len(), 4);
        assert!(fence.contains(&GeoPoint::new(44.34, -78.73)));
    }

    #[test]
    fn test_too_few_vertices() {
        let result = Geofence::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ]);
        assert!(matches!(result, Err(ScanError::InvalidGeofence(_))));
        assert!(Geofence::new(vec![]).is_err());
    }

    #[test]
    fn test_collinear_vertices_are_degenerate() {
        let result = Geofence::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 2.0),
        ]);
        assert!(matches!(result, Err(ScanError::InvalidGeofence(_))));
    }

    #[test]
    fn test_non_finite_vertex() {
        let result = Geofence::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, f64::INFINITY),
            GeoPoint::new(1.0, 1.0),
        ]);
        assert!(matches!(result, Err(ScanError::InvalidGeofence(_))));
    }

    #[test]
    fn test_from_geo_polygon() {
        let polygon = polygon![
            (x: 0.0, y: 0.0),
            (x: 2.0, y: 0.0),
            (x: 2.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let fence = Geofence::try_from(&polygon)
            .expect("test invariant failed: polygon is a valid geofence");
        let bbox = fence.bounding_box();
        assert_eq!(bbox.max_lat, 1.0);
        assert_eq!(bbox.max_lon, 2.0);
        assert!(fence.contains(&GeoPoint::new(0.5, 1.5)));
        assert!(!fence.contains(&GeoPoint::new(1.5, 0.5)));
    }
}
