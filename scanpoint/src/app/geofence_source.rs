use super::ScanCliError;
use crate::model::{GeoPoint, Geofence};
use geo::Geometry;
use itertools::Itertools;
use serde::Deserialize;
use wkt::TryFromWkt;

#[derive(Debug, Deserialize)]
struct VertexRow {
    #[serde(alias = "lat")]
    latitude: f64,
    #[serde(alias = "lon")]
    longitude: f64,
}

/// reads a geofence from a file. a `.csv` file holds one vertex per row with
/// `latitude` and `longitude` columns. any other file is read as a WKT POLYGON
/// (or a MULTIPOLYGON with a single member) with x=longitude and y=latitude.
pub fn read_geofence(filepath: &str) -> Result<Geofence, ScanCliError> {
    let geofence = if filepath.ends_with(".csv") {
        read_csv_vertices(filepath)?
    } else {
        let wkt_str = std::fs::read_to_string(filepath)?;
        from_wkt(&wkt_str)?
    };
    log::info!(
        "read geofence with {} vertices from {filepath}, extent {}",
        geofence.vertices().len(),
        geofence.bounding_box()
    );
    Ok(geofence)
}

fn read_csv_vertices(filepath: &str) -> Result<Geofence, ScanCliError> {
    let csv_error = |e: csv::Error| ScanCliError::CsvReadError(filepath.to_string(), e);
    let mut reader = csv::Reader::from_path(filepath).map_err(csv_error)?;
    let vertices = reader
        .deserialize::<VertexRow>()
        .map_ok(|row| GeoPoint::new(row.latitude, row.longitude))
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;
    Ok(Geofence::new(vertices)?)
}

fn from_wkt(wkt_str: &str) -> Result<Geofence, ScanCliError> {
    let geometry: Geometry<f64> = Geometry::try_from_wkt_str(wkt_str.trim())
        .map_err(|e| ScanCliError::InvalidWkt(e.to_string()))?;
    let polygon = match geometry {
        Geometry::Polygon(p) => p,
        Geometry::MultiPolygon(mp) if mp.0.len() == 1 => mp.0.into_iter().next().ok_or_else(
            || ScanCliError::InvalidWkt(String::from("MULTIPOLYGON has no members")),
        )?,
        _ => {
            return Err(ScanCliError::InvalidWkt(String::from(
                "geofence must be a POLYGON or a MULTIPOLYGON with one member",
            )))
        }
    };
    Ok(Geofence::try_from(&polygon)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("test invariant failed: cannot create temp file");
        file.write_all(contents.as_bytes())
            .expect("test invariant failed: cannot write temp file");
        file
    }

    #[test]
    fn test_wkt_axis_order() {
        let fence = from_wkt("POLYGON ((-78.788005 44.371398, -78.744307 44.297078, -78.67876 44.30785, -78.721002 44.388749, -78.788005 44.371398))")
            .expect("test invariant failed: WKT should parse");
        assert_eq!(fence.vertices().len(), 4);
        assert_eq!(fence.vertices()[0], GeoPoint::new(44.371398, -78.788005));
        assert!(fence.contains(&GeoPoint::new(44.34, -78.73)));
    }

    #[test]
    fn test_single_member_multipolygon() {
        let fence = from_wkt("MULTIPOLYGON (((0 0, 1 0, 1 1, 0 1, 0 0)))")
            .expect("test invariant failed: WKT should parse");
        assert!(fence.contains(&GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_non_polygonal_wkt() {
        let result = from_wkt("LINESTRING (0 0, 1 1)");
        assert!(matches!(result, Err(ScanCliError::InvalidWkt(_))));
        let result = from_wkt("not wkt");
        assert!(matches!(result, Err(ScanCliError::InvalidWkt(_))));
    }

    #[test]
    fn test_read_csv_vertices() {
        let file = write_temp(".csv", "lat,lon\n0.0,0.0\n0.0,1.0\n1.0,1.0\n1.0,0.0\n");
        let fence = read_geofence(&file.path().to_string_lossy())
            .expect("test invariant failed: csv should parse");
        assert_eq!(fence.vertices().len(), 4);
        assert!(fence.contains(&GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_read_degenerate_csv() {
        let file = write_temp(".csv", "lat,lon\n0.0,0.0\n1.0,1.0\n");
        let result = read_geofence(&file.path().to_string_lossy());
        assert!(matches!(result, Err(ScanCliError::ScanError { .. })));
    }

    #[test]
    fn test_read_wkt_file() {
        let file = write_temp(".wkt", "POLYGON ((0 0, 1 0, 1 1, 0 1, 0 0))\n");
        let fence = read_geofence(&file.path().to_string_lossy())
            .expect("test invariant failed: wkt should parse");
        assert!(fence.contains(&GeoPoint::new(0.25, 0.75)));
    }
}
