//! Cache access statistics and summary reporting.
//!
//! This module tracks the counters produced by a simulation run:
//! 1. **Access outcomes:** Hits, misses, and evictions, counted per access.
//! 2. **Write-back traffic:** Bytes dirtied and later evicted, accumulated on eviction.
//! 3. **Residency:** Bytes still dirty in the cache, filled in once at end of trace.

use std::fmt;

use serde::Serialize;

/// Counters for a single simulation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Accesses that found their block resident.
    pub hits: u64,
    /// Accesses that had to install their block.
    pub misses: u64,
    /// Misses that displaced a valid line.
    pub evictions: u64,
    /// Bytes dirty in the cache at end of trace (`B` per valid dirty line).
    #[serde(rename = "dirty_bytes_in_cache")]
    pub dirty_bytes: u64,
    /// Bytes written back by evictions (`B` per dirty line evicted).
    #[serde(rename = "dirty_bytes_evicted")]
    pub dirty_evictions: u64,
}

impl CacheStats {
    /// Total accesses applied (`hits + misses`).
    pub const fn accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Fraction of accesses that missed, or `0.0` before any access.
    pub fn miss_rate(&self) -> f64 {
        let total = self.accesses();
        if total == 0 {
            0.0
        } else {
            self.misses as f64 / total as f64
        }
    }

    /// Prints the one-line summary to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for CacheStats {
    /// Formats the summary line:
    /// `hits:H misses:M evictions:E dirty_bytes_in_cache:D dirty_bytes_evicted:DE`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits:{} misses:{} evictions:{} dirty_bytes_in_cache:{} dirty_bytes_evicted:{}",
            self.hits, self.misses, self.evictions, self.dirty_bytes, self.dirty_evictions
        )
    }
}
