//! Cache geometry and trace-format limits.
//!
//! This module defines the configuration of a simulation run. It provides:
//! 1. **Defaults:** Address width and the limits of the trace line format.
//! 2. **Geometry:** The validated `(s, b, E)` triple and the quantities derived from it.
//!
//! A `CacheGeometry` can only be obtained through [`CacheGeometry::new`], so every
//! geometry in circulation satisfies `E >= 1` and `s + b <= 64`.

use serde::Serialize;

use crate::common::{Address, AddressFields, ConfigError};

/// Fixed limits of the simulated machine and of the trace format.
pub mod defaults {
    /// Width of a simulated address in bits.
    pub const ADDRESS_BITS: u32 = 64;

    /// Size of the trace line buffer in bytes, including the terminator slot.
    ///
    /// A line is read like `fgets` into a buffer of this size: at most
    /// `LINE_BUFFER_LEN - 1` bytes per read, and a read that does not end in a
    /// newline is rejected. The longest accepted line is therefore
    /// `LINE_BUFFER_LEN - 2` characters plus `\n`.
    pub const LINE_BUFFER_LEN: usize = 30;

    /// Largest access size, in bytes, accepted in a trace record.
    pub const MAX_ACCESS_SIZE: u64 = 1024;
}

/// Validated cache geometry.
///
/// `S = 2^s` sets of `E` lines, each line caching a `B = 2^b` byte block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CacheGeometry {
    set_bits: u32,
    block_bits: u32,
    ways: usize,
}

impl CacheGeometry {
    /// Validates and builds a geometry.
    ///
    /// # Arguments
    ///
    /// * `set_bits` - Number of set-index bits `s`.
    /// * `block_bits` - Number of block-offset bits `b`.
    /// * `ways` - Associativity `E` (lines per set).
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroAssociativity`] if `ways == 0`, and
    /// [`ConfigError::AddressBitsExceeded`] if `set_bits + block_bits > 64`.
    pub fn new(set_bits: u32, block_bits: u32, ways: usize) -> Result<Self, ConfigError> {
        if set_bits
            .checked_add(block_bits)
            .is_none_or(|total| total > defaults::ADDRESS_BITS)
        {
            return Err(ConfigError::AddressBitsExceeded {
                set_bits,
                block_bits,
                limit: defaults::ADDRESS_BITS,
            });
        }
        if ways == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        Ok(Self {
            set_bits,
            block_bits,
            ways,
        })
    }

    /// Number of set-index bits `s`.
    #[inline]
    pub const fn set_bits(&self) -> u32 {
        self.set_bits
    }

    /// Number of block-offset bits `b`.
    #[inline]
    pub const fn block_bits(&self) -> u32 {
        self.block_bits
    }

    /// Associativity `E`.
    #[inline]
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Number of sets `S = 2^s`, or `None` if it does not fit in a `usize`.
    pub const fn num_sets(&self) -> Option<usize> {
        1usize.checked_shl(self.set_bits)
    }

    /// Total line count `S * E`, or `None` if it does not fit in a `usize`.
    pub fn num_lines(&self) -> Option<usize> {
        self.num_sets()?.checked_mul(self.ways)
    }

    /// Block size `B = 2^b` in bytes.
    ///
    /// Saturates to `u64::MAX` for the degenerate `b = 64` geometry.
    pub const fn block_bytes(&self) -> u64 {
        match 1u64.checked_shl(self.block_bits) {
            Some(bytes) => bytes,
            None => u64::MAX,
        }
    }

    /// Splits an address into tag, set index, and block offset.
    #[inline]
    pub const fn decompose(&self, addr: u64) -> AddressFields {
        Address::new(addr).split(self.set_bits, self.block_bits)
    }
}
