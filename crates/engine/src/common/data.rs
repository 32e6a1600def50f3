//! Memory Access Operations.
//!
//! Trace records carry one of two operations. The operation decides whether an
//! installed or hit line becomes dirty:
//! 1. **Load:** Never sets the dirty bit; a load hit keeps an existing dirty bit.
//! 2. **Store:** Always sets the dirty bit (write-allocate on miss, write-back on eviction).

use std::fmt;

/// Type of data memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Data read access (`L` in a trace).
    Load,

    /// Data write access (`S` in a trace).
    Store,
}

impl Operation {
    /// Maps a trace mnemonic to an operation.
    ///
    /// Only the exact strings `"L"` and `"S"` are accepted.
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        match mnemonic {
            "L" => Some(Self::Load),
            "S" => Some(Self::Store),
            _ => None,
        }
    }

    /// Returns the single-letter trace mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Load => "L",
            Self::Store => "S",
        }
    }

    /// Returns `true` for stores.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Store)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
