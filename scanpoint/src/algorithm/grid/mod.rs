mod grid_ops;

pub use grid_ops::{axis_values, build_grid, grid_size, step_degrees};

/// default physical spacing between neighboring grid candidates.
pub const DEFAULT_GRID_RESOLUTION_METERS: f64 = 70.0;
/// meters spanned by one degree of arc on the sphere used for haversine distance.
pub const METERS_PER_DEGREE: f64 =
    super::haversine::EARTH_RADIUS_KM * 1000.0 * std::f64::consts::PI / 180.0;
