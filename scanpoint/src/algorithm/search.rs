use super::{coverage, greedy, grid, parallel_map, ParallelOptions};
use crate::{
    config::ScanConfiguration,
    model::{EvaluatedCandidate, GeoPoint, Geofence, ScanError, ScanLocation},
};
use itertools::Itertools;
use std::collections::HashSet;

/// the selected scan locations along with statistics about the search.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub locations: Vec<ScanLocation>,
    /// distinct spawnpoints inside the geofence that the search considered
    pub valid_spawnpoints: Vec<GeoPoint>,
    /// number of grid candidates evaluated
    pub grid_size: usize,
    /// number of candidates that failed evaluation and were skipped
    pub failures: usize,
}

impl ScanResult {
    /// valid spawnpoints not claimed by any selected location.
    pub fn uncovered(&self) -> Vec<GeoPoint> {
        let claimed: HashSet<&GeoPoint> = self
            .locations
            .iter()
            .flat_map(|l| l.covered.iter())
            .collect();
        self.valid_spawnpoints
            .iter()
            .filter(|p| !claimed.contains(p))
            .copied()
            .collect_vec()
    }
}

/// finds scan locations that each claim at least `min_spawnpoints` spawnpoints
/// within `radius` of the location, restricted to the geofence.
///
/// all spawnpoints and all grid candidates are held in memory at once, so the
/// feasible grid density is bounded by the geofence extent and available memory.
pub fn find_scan_locations(
    spawnpoints: &[GeoPoint],
    geofence: &Geofence,
    config: &ScanConfiguration,
) -> Result<ScanResult, ScanError> {
    config.validate()?;

    let valid_spawnpoints = prefilter_spawnpoints(spawnpoints, geofence);
    log::info!(
        "number of valid spawnpoints within geofence: {}",
        valid_spawnpoints.len()
    );
    if valid_spawnpoints.len() < config.min_spawnpoints {
        log::info!(
            "fewer than {} valid spawnpoints, no scan locations can be selected",
            config.min_spawnpoints
        );
        return Ok(ScanResult {
            valid_spawnpoints,
            ..Default::default()
        });
    }

    let step = config.step_degrees()?;
    let bbox = geofence.bounding_box();
    log::info!(
        "generating {} grid candidates over {bbox} with step {step} degrees",
        grid::grid_size(bbox, step)?
    );
    let candidates = grid::build_grid(bbox, step)?;

    let options = ParallelOptions::new(
        config.parallelism,
        config
            .progress
            .then(|| String::from("processing grid points")),
    );
    let (evaluated, failures) = scan_candidates(
        &candidates,
        &valid_spawnpoints,
        geofence,
        config.radius,
        config.min_spawnpoints,
        &options,
    )?;

    let locations = greedy::select(evaluated, config.min_spawnpoints);
    log::info!(
        "found {} scan locations for collecting at least {} spawnpoints each",
        locations.len(),
        config.min_spawnpoints
    );

    Ok(ScanResult {
        locations,
        valid_spawnpoints,
        grid_size: candidates.len(),
        failures,
    })
}

/// evaluates every grid candidate in parallel with the same spawnpoints, geofence,
/// radius and minimum count. the result has one entry per candidate in grid order.
/// a candidate that fails evaluation is logged and treated as rejected so that it
/// cannot abort the scan. the failure count is returned alongside the results.
pub fn scan_candidates(
    candidates: &[GeoPoint],
    points: &[GeoPoint],
    geofence: &Geofence,
    radius: f64,
    min_count: usize,
    options: &ParallelOptions,
) -> Result<(Vec<Option<EvaluatedCandidate>>, usize), ScanError> {
    let results = parallel_map(
        candidates,
        |candidate| coverage::evaluate(candidate, points, geofence, radius, min_count),
        options,
    )?;

    let mut failures = 0;
    let evaluated = results
        .into_iter()
        .map(|result| match result {
            Ok(evaluated) => evaluated,
            Err(e) => {
                log::warn!("skipping candidate: {e}");
                failures += 1;
                None
            }
        })
        .collect_vec();
    if failures > 0 {
        log::warn!("{failures} of {} grid candidates failed evaluation", candidates.len());
    }
    Ok((evaluated, failures))
}

/// restricts spawnpoints to distinct, finite points inside the geofence, keeping
/// the first occurrence of each.
pub fn prefilter_spawnpoints(spawnpoints: &[GeoPoint], geofence: &Geofence) -> Vec<GeoPoint> {
    let (finite, non_finite): (Vec<&GeoPoint>, Vec<&GeoPoint>) =
        spawnpoints.iter().partition(|p| p.is_finite());
    if !non_finite.is_empty() {
        log::warn!(
            "ignoring {} spawnpoints with non-finite coordinates",
            non_finite.len()
        );
    }
    finite
        .into_iter()
        .filter(|p| geofence.contains(p))
        .unique()
        .copied()
        .collect_vec()
}
