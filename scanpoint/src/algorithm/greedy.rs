use crate::model::{EvaluatedCandidate, GeoPoint, ScanLocation};
use indexmap::IndexSet;
use std::collections::HashSet;

/// greedy selection of scan locations from evaluated candidates.
///
/// candidates are consumed in order, skipping None entries. each candidate keeps
/// only the spawnpoints not already claimed by an accepted location. if at least
/// `min_count` of those remain, the candidate is accepted and claims them.
///
/// this is an order-dependent approximation of set cover: earlier candidates get
/// first claim on shared spawnpoints, so the output is deterministic for a fixed
/// candidate order but reordering the candidates can change which locations are
/// selected and how many. the accepted coverage sets are pairwise disjoint.
pub fn select<I>(candidates: I, min_count: usize) -> Vec<ScanLocation>
where
    I: IntoIterator<Item = Option<EvaluatedCandidate>>,
{
    let mut used: HashSet<GeoPoint> = HashSet::new();
    let mut selected: Vec<ScanLocation> = vec![];
    for candidate in candidates.into_iter().flatten() {
        let unique: IndexSet<GeoPoint> = candidate
            .covered
            .into_iter()
            .filter(|p| !used.contains(p))
            .collect();
        if unique.len() >= min_count {
            used.extend(unique.iter().copied());
            selected.push(ScanLocation::new(candidate.location, unique));
        }
    }
    log::debug!(
        "greedy selection accepted {} locations claiming {} spawnpoints",
        selected.len(),
        used.len()
    );
    selected
}
