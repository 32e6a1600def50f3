//! Set-associative data cache simulator library.
//!
//! This crate replays load/store memory traces against a write-back,
//! write-allocate cache with LRU replacement and provides the following:
//! 1. **Geometry:** Validated cache shape (set-index bits, block-offset bits, associativity).
//! 2. **Cache Engine:** Set-major line storage, hit/miss/eviction decisions, and dirty-byte accounting.
//! 3. **Trace Parsing:** Strict `<op> <hexaddr>,<size>` line reader with a bounded line buffer.
//! 4. **Simulation:** Driver that feeds parsed records to the engine and finalizes statistics.

/// Common types (access operations, address decomposition, error types).
pub mod common;
/// Cache geometry and trace-format limits.
pub mod config;
/// Cache engine (sets, lines, LRU ordering, statistics updates).
pub mod cache;
/// Trace record parsing and line-bounded trace reading.
pub mod trace;
/// Simulation driver tying the trace reader to the cache engine.
pub mod sim;
/// Access statistics and summary rendering.
pub mod stats;

/// Validated cache shape; construct with `CacheGeometry::new`.
pub use crate::config::CacheGeometry;
/// Cache engine; owns all lines and counters.
pub use crate::cache::{AccessOutcome, CacheSim};
/// Top-level error type returned by fallible simulator operations.
pub use crate::common::SimError;
/// Trace replay driver.
pub use crate::sim::{Simulator, simulate_file};
/// Access counters reported at the end of a run.
pub use crate::stats::CacheStats;
