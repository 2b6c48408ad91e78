use super::METERS_PER_DEGREE;
use crate::model::{BoundingBox, GeoPoint, ScanError};
use itertools::Itertools;

/// converts a target physical resolution into a grid step in degrees. the
/// density factor divides the step, so larger factors produce finer grids.
pub fn step_degrees(resolution_meters: f64, density_factor: f64) -> Result<f64, ScanError> {
    if !(resolution_meters.is_finite() && resolution_meters > 0.0) {
        return Err(ScanError::InvalidConfiguration(format!(
            "grid resolution must be a positive number of meters, found {resolution_meters}"
        )));
    }
    if !(density_factor.is_finite() && density_factor > 0.0) {
        return Err(ScanError::InvalidConfiguration(format!(
            "grid density factor must be positive, found {density_factor}"
        )));
    }
    Ok(resolution_meters / METERS_PER_DEGREE / density_factor)
}

/// values `min + i * step` over the half-open range `[min, max)`. each value is
/// computed from its index instead of accumulated, so the lattice does not drift.
pub fn axis_values(min: f64, max: f64, step: f64) -> Result<Vec<f64>, ScanError> {
    let n = axis_len(min, max, step)?;
    Ok((0..n).map(|i| min + i as f64 * step).collect_vec())
}

/// number of candidates [`build_grid`] would produce, without building it.
pub fn grid_size(bbox: &BoundingBox, step: f64) -> Result<usize, ScanError> {
    let n_lat = axis_len(bbox.min_lat, bbox.max_lat, step)?;
    let n_lon = axis_len(bbox.min_lon, bbox.max_lon, step)?;
    n_lat.checked_mul(n_lon).ok_or_else(|| {
        ScanError::InvalidConfiguration(format!(
            "grid of {n_lat} x {n_lon} candidates is too large"
        ))
    })
}

/// builds the lattice of candidate scan locations over a bounding box. candidates
/// are in row-major order: every longitude for the first latitude, then every
/// longitude for the next latitude, and so on. candidates that fall outside the
/// geofence are not removed here.
pub fn build_grid(bbox: &BoundingBox, step: f64) -> Result<Vec<GeoPoint>, ScanError> {
    let latitudes = axis_values(bbox.min_lat, bbox.max_lat, step)?;
    let longitudes = axis_values(bbox.min_lon, bbox.max_lon, step)?;
    log::debug!(
        "building grid of {} latitudes x {} longitudes with step {step}",
        latitudes.len(),
        longitudes.len()
    );
    let grid = latitudes
        .iter()
        .cartesian_product(longitudes.iter())
        .map(|(lat, lon)| GeoPoint::new(*lat, *lon))
        .collect_vec();
    Ok(grid)
}

fn axis_len(min: f64, max: f64, step: f64) -> Result<usize, ScanError> {
    if !(step.is_finite() && step > 0.0) {
        return Err(ScanError::InvalidConfiguration(format!(
            "grid step must be a positive number of degrees, found {step}"
        )));
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(ScanError::InvalidConfiguration(format!(
            "grid bounds must be finite, found [{min},{max})"
        )));
    }
    if max <= min {
        return Ok(0);
    }
    let n = ((max - min) / step).ceil();
    if n > usize::MAX as f64 {
        return Err(ScanError::InvalidConfiguration(format!(
            "grid axis [{min},{max}) with step {step} has too many values"
        )));
    }
    Ok(n as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::grid::DEFAULT_GRID_RESOLUTION_METERS;

    fn unit_bbox() -> BoundingBox {
        BoundingBox {
            min_lat: 0.0,
            max_lat: 1.0,
            min_lon: 0.0,
            max_lon: 1.0,
        }
    }

    #[test]
    fn test_axis_is_half_open() {
        let values = axis_values(0.0, 1.0, 0.25).expect("test invariant failed");
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);
        let values = axis_values(0.0, 1.1, 0.25).expect("test invariant failed");
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }

    #[test]
    fn test_empty_axis() {
        let values = axis_values(1.0, 1.0, 0.25).expect("test invariant failed");
        assert!(values.is_empty());
    }

    #[test]
    fn test_grid_is_row_major() {
        let grid = build_grid(&unit_bbox(), 0.5).expect("test invariant failed");
        assert_eq!(
            grid,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.0, 0.5),
                GeoPoint::new(0.5, 0.0),
                GeoPoint::new(0.5, 0.5),
            ]
        );
    }

    #[test]
    fn test_grid_size_matches_grid() {
        let bbox = BoundingBox {
            min_lat: 44.297078,
            max_lat: 44.388749,
            min_lon: -78.788005,
            max_lon: -78.67876,
        };
        let step = step_degrees(DEFAULT_GRID_RESOLUTION_METERS, 1.0).expect("test invariant failed");
        let grid = build_grid(&bbox, step).expect("test invariant failed");
        let size = grid_size(&bbox, step).expect("test invariant failed");
        assert_eq!(grid.len(), size);
        assert!(grid.iter().all(|p| bbox.contains(p)));
    }

    #[test]
    fn test_step_degrees() {
        let step = step_degrees(70.0, 1.0).expect("test invariant failed");
        assert!((step * METERS_PER_DEGREE - 70.0).abs() < 1e-9);
        let finer = step_degrees(70.0, 3.0).expect("test invariant failed");
        assert!((finer * 3.0 - step).abs() < 1e-15);
    }

    #[test]
    fn test_invalid_step() {
        assert!(step_degrees(70.0, 0.0).is_err());
        assert!(step_degrees(-1.0, 1.0).is_err());
        assert!(step_degrees(70.0, f64::NAN).is_err());
        assert!(build_grid(&unit_bbox(), 0.0).is_err());
    }
}
