// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The per-type address suffix: `bit_index`, `string{...}`, `bytes{...}`,
//! `value32{...}`, `value64{...}`.
//!
//! The textual suffix format is `.<kind>(<params>)`, consumed after the
//! `slave!area:offset` triple by [`parse_option_suffix`]. A point whose type
//! takes no sub-option (e.g. `INT16`) is simply followed by nothing.

use crate::endian::{Endianness32, Endianness64};
use crate::error::Error;

/// String sub-encoding: how a register pair maps onto two ASCII bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringEncoding {
    /// High byte of the register holds the first character.
    H,
    /// Low byte of the register holds the first character; register pairs
    /// are byte-swapped before writing.
    L,
    /// One register per character, value in the low byte ("D" = decimal).
    D,
    /// One register per character, value in the high byte ("E" = extended).
    E,
}

/// `bit_index` sub-option for `BIT` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitOption {
    pub bit_index: u8,
}

/// `string{length, encoding}` sub-option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringOption {
    pub length: u8,
    pub encoding: StringEncoding,
}

/// `bytes{length}` sub-option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BytesOption {
    pub length: u8,
}

/// `value32{endianness, is_default}` sub-option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value32Option {
    pub endianness: Endianness32,
    /// `true` when the tag defers to the run-level default endianness.
    pub is_default: bool,
}

/// `value64{endianness, is_default}` sub-option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Value64Option {
    pub endianness: Endianness64,
    pub is_default: bool,
}

/// Discriminated record carrying exactly the sub-data relevant to a point's
/// compiled [`crate::scalar::ScalarType`]; modeled as an enum rather than an
/// all-fields-present union, since Rust can express "exactly one of" directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressOption {
    /// No sub-option: fixed-width scalars without sub-encoding.
    None,
    Bit(BitOption),
    String(StringOption),
    Bytes(BytesOption),
    Value32(Value32Option),
    Value64(Value64Option),
}

impl AddressOption {
    #[must_use]
    pub const fn bit(&self) -> Option<BitOption> {
        match self {
            Self::Bit(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn string(&self) -> Option<StringOption> {
        match self {
            Self::String(s) => Some(*s),
            _ => None,
        }
    }

    #[must_use]
    pub const fn bytes(&self) -> Option<BytesOption> {
        match self {
            Self::Bytes(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value32(&self) -> Option<Value32Option> {
        match self {
            Self::Value32(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value64(&self) -> Option<Value64Option> {
        match self {
            Self::Value64(v) => Some(*v),
            _ => None,
        }
    }
}

/// Parse the suffix following `slave!area:offset`.
///
/// Accepted forms (empty suffix yields [`AddressOption::None`]):
/// - `.bit=<0-15>`
/// - `.string(H|L|D|E,<1-127>)`
/// - `.bytes(<2-128>)`
/// - `.value32(ABCD|CDAB|BADC|DCBA)` or `.value32(default)`
/// - `.value64(LL|BB|LB|BL)` or `.value64(default)`
pub fn parse_option_suffix(suffix: &str) -> Result<AddressOption, Error> {
    if suffix.is_empty() {
        return Ok(AddressOption::None);
    }
    let suffix = suffix
        .strip_prefix('.')
        .ok_or_else(|| invalid(suffix))?;

    if let Some(rest) = suffix.strip_prefix("bit=") {
        let bit_index: u8 = rest.parse().map_err(|_| invalid(suffix))?;
        return Ok(AddressOption::Bit(BitOption { bit_index }));
    }

    if let Some(rest) = suffix.strip_prefix("string(").and_then(|s| s.strip_suffix(')')) {
        let mut parts = rest.splitn(2, ',');
        let kind = parts.next().ok_or_else(|| invalid(suffix))?;
        let length_str = parts.next().ok_or_else(|| invalid(suffix))?;
        let length: u8 = length_str.parse().map_err(|_| invalid(suffix))?;
        let encoding = match kind {
            "H" => StringEncoding::H,
            "L" => StringEncoding::L,
            "D" => StringEncoding::D,
            "E" => StringEncoding::E,
            _ => return Err(invalid(suffix)),
        };
        return Ok(AddressOption::String(StringOption { length, encoding }));
    }

    if let Some(rest) = suffix.strip_prefix("bytes(").and_then(|s| s.strip_suffix(')')) {
        let length: u8 = rest.parse().map_err(|_| invalid(suffix))?;
        return Ok(AddressOption::Bytes(BytesOption { length }));
    }

    if let Some(rest) = suffix.strip_prefix("value32(").and_then(|s| s.strip_suffix(')')) {
        return parse_value32(rest).map(AddressOption::Value32).ok_or_else(|| invalid(suffix));
    }

    if let Some(rest) = suffix.strip_prefix("value64(").and_then(|s| s.strip_suffix(')')) {
        return parse_value64(rest).map(AddressOption::Value64).ok_or_else(|| invalid(suffix));
    }

    Err(invalid(suffix))
}

fn parse_value32(rest: &str) -> Option<Value32Option> {
    let (endianness, is_default) = match rest {
        "default" => (Endianness32::default(), true),
        "ABCD" => (Endianness32::Abcd, false),
        "CDAB" => (Endianness32::Cdab, false),
        "BADC" => (Endianness32::Badc, false),
        "DCBA" => (Endianness32::Dcba, false),
        _ => return None,
    };
    Some(Value32Option {
        endianness,
        is_default,
    })
}

fn parse_value64(rest: &str) -> Option<Value64Option> {
    let (endianness, is_default) = match rest {
        "default" => (Endianness64::default(), true),
        "LL" => (Endianness64::Ll, false),
        "BB" => (Endianness64::Bb, false),
        "LB" => (Endianness64::Lb, false),
        "BL" => (Endianness64::Bl, false),
        _ => return None,
    };
    Some(Value64Option {
        endianness,
        is_default,
    })
}

fn invalid(suffix: &str) -> Error {
    Error::AddressFormatInvalid(format!("unrecognized option suffix {suffix:?}"))
}
