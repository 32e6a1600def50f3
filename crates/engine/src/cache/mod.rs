//! Set-Associative Cache Engine.
//!
//! This module implements the write-back, write-allocate data cache whose
//! behavior the simulator reports on. Lines live in one flat set-major buffer;
//! set `i` occupies `[i * E, (i + 1) * E)`.
//!
//! Recency is stored as position within the set: position 0 is the least
//! recently used line and position `E - 1` the most recently used. Invalid
//! lines always form a prefix of the set, so the replacement victim is always
//! at position 0 and both promotion and installation are a left rotation.

use tracing::{debug, trace};

use crate::common::{Operation, SimError};
use crate::config::CacheGeometry;
use crate::stats::CacheStats;

/// Cache line entry containing tag, validity, and dirty bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheLine {
    /// Line holds a block.
    pub valid: bool,
    /// Tag of the resident block; meaningless while `valid` is false.
    pub tag: u64,
    /// Block was written since it was installed.
    pub dirty: bool,
}

/// Decision taken for a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed into an invalid line.
    Miss,
    /// The block was installed by evicting the set's LRU line.
    MissEviction {
        /// The evicted line was dirty and its block was written back.
        dirty: bool,
    },
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }

    /// Verbose-mode label: `hit`, `miss`, `miss eviction`, or `miss eviction dirty`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::MissEviction { dirty: false } => "miss eviction",
            Self::MissEviction { dirty: true } => "miss eviction dirty",
        }
    }
}

/// Cache simulator owning every line and counter of one run.
#[derive(Debug)]
pub struct CacheSim {
    geometry: CacheGeometry,
    block_bytes: u64,
    lines: Vec<CacheLine>,
    stats: CacheStats,
}

impl CacheSim {
    /// Allocates an empty cache (all lines invalid and clean) for `geometry`.
    ///
    /// # Errors
    ///
    /// [`SimError::Allocation`] if `2^s * E` lines are not addressable on this
    /// host or the allocation fails.
    pub fn new(geometry: CacheGeometry) -> Result<Self, SimError> {
        let allocation_error = || SimError::Allocation {
            sets: 1u128 << geometry.set_bits(),
            ways: geometry.ways(),
        };

        let num_lines = geometry.num_lines().ok_or_else(allocation_error)?;
        let mut lines = Vec::new();
        lines
            .try_reserve_exact(num_lines)
            .map_err(|_| allocation_error())?;
        lines.resize(num_lines, CacheLine::default());

        debug!(
            set_bits = geometry.set_bits(),
            block_bits = geometry.block_bits(),
            ways = geometry.ways(),
            num_lines,
            "cache allocated"
        );

        Ok(Self {
            block_bytes: geometry.block_bytes(),
            geometry,
            lines,
            stats: CacheStats::default(),
        })
    }

    /// Geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Counters accumulated so far. `dirty_bytes` stays zero until [`Self::finalize`].
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Lines of one set, ordered LRU (index 0) to MRU (last index).
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= 2^s`.
    pub fn set_lines(&self, set_index: u64) -> &[CacheLine] {
        let ways = self.geometry.ways();
        let base = set_index as usize * ways;
        &self.lines[base..base + ways]
    }

    /// Applies one access to the set at `set_index` and updates the counters.
    ///
    /// A hit rotates the matching line to the MRU end. A miss rotates the
    /// whole set left by one, dropping the line at position 0 (an invalid
    /// line if any remain, otherwise the LRU victim), and installs the new
    /// block at the MRU end. Stores mark the touched line dirty; loads leave
    /// the dirty bit as it was.
    ///
    /// # Arguments
    ///
    /// * `op` - Load or store.
    /// * `tag` - Tag bits of the accessed address.
    /// * `set_index` - Set selected by the address; must come from
    ///   [`CacheGeometry::decompose`] for this cache's geometry.
    ///
    /// # Panics
    ///
    /// Panics if `set_index >= 2^s`.
    pub fn access(&mut self, op: Operation, tag: u64, set_index: u64) -> AccessOutcome {
        let ways = self.geometry.ways();
        let base = set_index as usize * ways;
        let set = &mut self.lines[base..base + ways];

        if let Some(way) = set.iter().position(|line| line.valid && line.tag == tag) {
            self.stats.hits += 1;
            // Everything after a valid line is valid, so the hit line lands at the MRU slot.
            set[way..].rotate_left(1);
            if op.is_write() {
                set[ways - 1].dirty = true;
            }
            trace!(%op, tag, set_index, way, "hit");
            return AccessOutcome::Hit;
        }

        self.stats.misses += 1;
        let victim = set[0];
        let outcome = if victim.valid {
            self.stats.evictions += 1;
            if victim.dirty {
                self.stats.dirty_evictions =
                    self.stats.dirty_evictions.saturating_add(self.block_bytes);
            }
            AccessOutcome::MissEviction {
                dirty: victim.dirty,
            }
        } else {
            AccessOutcome::Miss
        };

        set.rotate_left(1);
        set[ways - 1] = CacheLine {
            valid: true,
            tag,
            dirty: op.is_write(),
        };

        trace!(%op, tag, set_index, victim_tag = victim.tag, outcome = outcome.label(), "miss");
        outcome
    }

    /// Bytes currently dirty in the cache: `B` times the number of valid dirty lines.
    pub fn dirty_bytes_in_residence(&self) -> u64 {
        let dirty_lines = self
            .lines
            .iter()
            .filter(|line| line.valid && line.dirty)
            .count() as u64;
        dirty_lines.saturating_mul(self.block_bytes)
    }

    /// Returns the final counters with `dirty_bytes` computed from the current contents.
    pub fn finalize(&self) -> CacheStats {
        CacheStats {
            dirty_bytes: self.dirty_bytes_in_residence(),
            ..self.stats
        }
    }
}
