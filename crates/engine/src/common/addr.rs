//! Address type and tag/set/offset decomposition.
//!
//! A 64-bit address is split into three fields by the cache geometry:
//!
//! ```text
//!  63                    s+b  s+b-1        b  b-1          0
//! +-------------------------+---------------+--------------+
//! |           tag           |   set index   | block offset |
//! +-------------------------+---------------+--------------+
//! ```
//!
//! Zero-width fields are legal: `s = 0` yields set index 0, `b = 0` yields
//! offset 0, and `s + b = 64` yields tag 0.

/// A data address in the simulated 64-bit address space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u64);

/// Fields extracted from an [`Address`] for a given geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressFields {
    /// High-order bits identifying the block within its set.
    pub tag: u64,
    /// Middle bits selecting one of `2^s` sets.
    pub set_index: u64,
    /// Low-order bits selecting a byte within the block. Unused by the engine.
    pub block_offset: u64,
}

impl Address {
    /// Creates an address from a raw 64-bit value.
    #[inline]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Splits the address into tag, set index, and block offset.
    ///
    /// Callers must ensure `set_bits + block_bits <= 64`; wider inputs saturate
    /// to a zero tag rather than panicking.
    #[inline]
    pub const fn split(self, set_bits: u32, block_bits: u32) -> AddressFields {
        let tag = shr(self.0, set_bits.saturating_add(block_bits));
        let set_index = if set_bits == 0 {
            0
        } else {
            shr(self.0, block_bits) & low_mask(set_bits)
        };
        let block_offset = self.0 & low_mask(block_bits);
        AddressFields {
            tag,
            set_index,
            block_offset,
        }
    }
}

/// Logical right shift that yields 0 for shift amounts of 64 or more.
#[inline]
const fn shr(value: u64, amount: u32) -> u64 {
    match value.checked_shr(amount) {
        Some(v) => v,
        None => 0,
    }
}

/// Mask with the low `bits` bits set; all ones for 64 or more.
#[inline]
const fn low_mask(bits: u32) -> u64 {
    match 1u64.checked_shl(bits) {
        Some(v) => v - 1,
        None => u64::MAX,
    }
}
