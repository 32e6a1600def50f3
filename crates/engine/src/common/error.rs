//! Error types for the simulator.
//!
//! This module defines every failure the simulator reports. It provides:
//! 1. **Configuration Errors:** Missing or out-of-range geometry parameters.
//! 2. **Parse Errors:** Trace lines that violate the record grammar or value ranges.
//! 3. **Simulation Errors:** The top-level type that also covers I/O and allocation failures.
//!
//! All errors are fatal to a run; the engine itself never fails once constructed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A mandatory option was not supplied.
    ///
    /// The associated value is the option letter (`s`, `b`, `E`, or `t`).
    #[error("Mandatory argument -{0} missing")]
    MissingArgument(char),

    /// Associativity must be at least one line per set.
    #[error("Associativity (-E) must be greater than 0")]
    ZeroAssociativity,

    /// Set-index and block-offset bits together exceed the address width.
    #[error("s + b is too large (s = {set_bits}, b = {block_bits}, limit {limit})")]
    AddressBitsExceeded {
        /// Requested set-index bits.
        set_bits: u32,
        /// Requested block-offset bits.
        block_bits: u32,
        /// Address width in bits.
        limit: u32,
    },
}

/// Reason a single trace line was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The stream ended before the line's terminating newline.
    #[error("line is not terminated by a newline")]
    MissingNewline,

    /// The line did not fit in the fixed-size line buffer.
    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),

    /// The line is not valid UTF-8.
    #[error("line is not valid UTF-8")]
    NotUtf8,

    /// The operation is not `L` or `S`.
    #[error("invalid operation {0:?}")]
    InvalidOperation(String),

    /// A required field is absent.
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// The address field is not a hexadecimal numeral.
    #[error("invalid address {0:?}")]
    InvalidAddress(String),

    /// The address field does not fit in 64 bits.
    #[error("address {0:?} exceeds 64 bits")]
    AddressOverflow(String),

    /// The size field is not a decimal numeral.
    #[error("invalid size {0:?}")]
    InvalidSize(String),

    /// The size is zero or larger than the maximum access size.
    #[error("size {0} out of range")]
    SizeOutOfRange(u64),
}

/// A rejected trace line with its 1-based line number.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("trace line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number within the trace.
    pub line: usize,
    /// What was wrong with the line.
    pub kind: ParseErrorKind,
}

/// Top-level simulator error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid geometry or missing option.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The trace file could not be opened.
    #[error("Error opening '{}': {source}", path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// Reading from an already-open trace failed.
    #[error("Error reading trace: {0}")]
    Read(#[source] io::Error),

    /// A trace line was malformed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The line array for the requested geometry could not be allocated.
    #[error("Allocation error: cannot allocate {sets} sets of {ways} lines")]
    Allocation {
        /// Number of sets requested (`2^s`, saturated).
        sets: u128,
        /// Lines per set.
        ways: usize,
    },
}
