pub mod coverage;
pub mod greedy;
pub mod grid;
pub mod haversine;
mod parallel;
pub mod search;

pub use parallel::{parallel_map, ParallelOptions};
pub use search::{find_scan_locations, ScanResult};
