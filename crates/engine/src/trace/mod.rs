//! Memory trace records and their text format.
//!
//! Every trace line has the strict form
//!
//! ```text
//! <OP> <HEXADDR>,<DECSIZE>\n
//! ```
//!
//! where `<OP>` is `L` or `S`, `<HEXADDR>` is a hexadecimal numeral (an
//! optional `0x` prefix is accepted) no wider than 64 bits, and `<DECSIZE>` is
//! a decimal byte count in `1..=1024`. Nothing may follow the size before the
//! newline.

/// Line-bounded trace reader.
pub mod reader;

pub use reader::TraceReader;

use crate::common::{Operation, ParseErrorKind};
use crate::config::defaults::MAX_ACCESS_SIZE;

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Load or store.
    pub op: Operation,
    /// Accessed address.
    pub addr: u64,
    /// Access size in bytes; validated but not used by the engine.
    pub size: u16,
}

impl TraceRecord {
    /// Parses a single trace line with its trailing newline already removed.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseErrorKind`] describing the first rule the line breaks.
    pub fn parse(line: &str) -> Result<Self, ParseErrorKind> {
        let (mnemonic, rest) = match line.split_once(' ') {
            Some((mnemonic, rest)) => (mnemonic, Some(rest)),
            None => (line, None),
        };
        let op = Operation::from_mnemonic(mnemonic)
            .ok_or_else(|| ParseErrorKind::InvalidOperation(mnemonic.to_owned()))?;
        let rest = rest.ok_or(ParseErrorKind::MissingField("address"))?;

        let (addr_field, size_field) = rest
            .split_once(',')
            .ok_or(ParseErrorKind::MissingField("size"))?;

        Ok(Self {
            op,
            addr: parse_address(addr_field)?,
            size: parse_size(size_field)?,
        })
    }
}

/// Parses a hexadecimal address, with or without a `0x` prefix.
fn parse_address(field: &str) -> Result<u64, ParseErrorKind> {
    let digits = field
        .strip_prefix("0x")
        .or_else(|| field.strip_prefix("0X"))
        .unwrap_or(field);
    if digits.is_empty() {
        return Err(if field.is_empty() {
            ParseErrorKind::MissingField("address")
        } else {
            ParseErrorKind::InvalidAddress(field.to_owned())
        });
    }
    if !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return Err(ParseErrorKind::InvalidAddress(field.to_owned()));
    }
    // Only overflow remains possible once every byte is a hex digit.
    u64::from_str_radix(digits, 16).map_err(|_| ParseErrorKind::AddressOverflow(field.to_owned()))
}

/// Parses a decimal access size in `1..=MAX_ACCESS_SIZE`.
fn parse_size(field: &str) -> Result<u16, ParseErrorKind> {
    if field.is_empty() {
        return Err(ParseErrorKind::MissingField("size"));
    }
    if !field.bytes().all(|c| c.is_ascii_digit()) {
        return Err(ParseErrorKind::InvalidSize(field.to_owned()));
    }
    let size = field.parse::<u64>().unwrap_or(u64::MAX);
    if size == 0 || size > MAX_ACCESS_SIZE {
        return Err(ParseErrorKind::SizeOutOfRange(size));
    }
    Ok(size as u16)
}
