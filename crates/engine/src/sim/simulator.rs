//! Trace replay driver.
//!
//! The `Simulator` owns a [`CacheSim`] and feeds it the records of one or more
//! traces in order. It performs:
//! 1. **Decomposition:** Splits each record's address into tag and set index.
//! 2. **Application:** Calls [`CacheSim::access`] and reports each outcome to an optional observer.
//! 3. **Finalization:** Computes the end-of-trace dirty residency and returns the counters.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::cache::{AccessOutcome, CacheSim};
use crate::common::SimError;
use crate::config::CacheGeometry;
use crate::stats::CacheStats;
use crate::trace::{TraceReader, TraceRecord};

/// Drives trace records into a cache.
#[derive(Debug)]
pub struct Simulator {
    cache: CacheSim,
}

impl Simulator {
    /// Allocates an empty cache for `geometry`.
    ///
    /// # Errors
    ///
    /// [`SimError::Allocation`] if the line array cannot be allocated.
    pub fn new(geometry: CacheGeometry) -> Result<Self, SimError> {
        Ok(Self {
            cache: CacheSim::new(geometry)?,
        })
    }

    /// The cache being driven.
    pub const fn cache(&self) -> &CacheSim {
        &self.cache
    }

    /// Applies a single record.
    pub fn apply(&mut self, record: &TraceRecord) -> AccessOutcome {
        let fields = self.cache.geometry().decompose(record.addr);
        self.cache.access(record.op, fields.tag, fields.set_index)
    }

    /// Replays every record of `reader`.
    ///
    /// # Errors
    ///
    /// Stops at the first unreadable or malformed line. Records before it
    /// have already been applied.
    pub fn run<R: BufRead>(&mut self, reader: R) -> Result<(), SimError> {
        self.run_with(reader, |_, _| {})
    }

    /// Replays every record of `reader`, calling `observer` after each access.
    ///
    /// # Errors
    ///
    /// Same as [`Self::run`].
    pub fn run_with<R, F>(&mut self, reader: R, mut observer: F) -> Result<(), SimError>
    where
        R: BufRead,
        F: FnMut(&TraceRecord, AccessOutcome),
    {
        let mut records = TraceReader::new(reader);
        for record in &mut records {
            let record = record?;
            let outcome = self.apply(&record);
            observer(&record, outcome);
        }
        debug!(
            lines = records.line_number(),
            accesses = self.cache.stats().accesses(),
            "trace replayed"
        );
        Ok(())
    }

    /// Opens `path` and replays it. The file is closed before returning.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be opened, otherwise as [`Self::run`].
    pub fn run_file<F>(&mut self, path: &Path, observer: F) -> Result<(), SimError>
    where
        F: FnMut(&TraceRecord, AccessOutcome),
    {
        let file = File::open(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "trace opened");
        self.run_with(BufReader::new(file), observer)
    }

    /// Consumes the simulator and returns the final counters.
    pub fn finish(self) -> CacheStats {
        self.cache.finalize()
    }
}
