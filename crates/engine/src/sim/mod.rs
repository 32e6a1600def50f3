//! Simulation driver.
//!
//! Ties the trace reader to the cache engine. [`simulate_file`] covers the
//! common case of one geometry and one trace file.

/// Trace replay driver.
pub mod simulator;

use std::path::Path;

pub use simulator::Simulator;

use crate::common::SimError;
use crate::config::CacheGeometry;
use crate::stats::CacheStats;

/// Replays the trace at `path` against a fresh cache and returns the final counters.
///
/// # Errors
///
/// Any allocation, I/O, or parse failure. No partial counters are returned.
pub fn simulate_file(geometry: CacheGeometry, path: &Path) -> Result<CacheStats, SimError> {
    let mut sim = Simulator::new(geometry)?;
    sim.run_file(path, |_, _| {})?;
    Ok(sim.finish())
}
