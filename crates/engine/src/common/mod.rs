//! Common types shared by the cache engine, the trace parser, and the driver.
//!
//! This module provides:
//! 1. **Address Types:** A strong address type and its tag/set/offset decomposition.
//! 2. **Memory Access:** The load/store operation carried by every trace record.
//! 3. **Error Handling:** Configuration, parse, and simulation error types.

/// Address type and field decomposition.
pub mod addr;

/// Memory access operation definitions.
pub mod data;

/// Error types for configuration, trace parsing, and simulation.
pub mod error;

pub use addr::{Address, AddressFields};
pub use data::Operation;
pub use error::{ConfigError, ParseError, ParseErrorKind, SimError};
