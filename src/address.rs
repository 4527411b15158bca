// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `slave!area:offset[.option]` textual address grammar.

use crate::area::Area;
use crate::error::Error;
use crate::option::{parse_option_suffix, AddressOption};

/// The catalog's offset convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressBase {
    /// Addresses in the catalog are already 0-based.
    Zero,
    /// Addresses in the catalog are 1-based; decremented on compile.
    One,
}

impl AddressBase {
    const fn as_u32(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Apply the base-adjustment rule from the data model: `65536` under
    /// base-0 clamps to `65535`; `0` under base-1 stays `0`; otherwise the
    /// base is subtracted.
    #[must_use]
    pub const fn adjust(self, raw_offset: u32) -> u16 {
        if raw_offset == 65536 && matches!(self, Self::Zero) {
            65535
        } else if raw_offset == 0 && matches!(self, Self::One) {
            0
        } else {
            (raw_offset - self.as_u32()) as u16
        }
    }
}

/// The three fields recovered from `slave!area:offset`, before base
/// adjustment and option parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAddress {
    pub slave_id: u8,
    pub area: Area,
    pub raw_offset: u32,
}

/// Parse `slave '!' area_digit offset` strictly: every character must be
/// accounted for by exactly these three fields, or parsing fails with
/// [`Error::AddressFormatInvalid`].
///
/// Returns the raw address plus whatever suffix followed the offset, so the
/// caller can hand it to [`parse_option_suffix`].
pub fn parse(address: &str) -> Result<(RawAddress, AddressOption), Error> {
    let bang = address.find('!').ok_or_else(|| invalid(address))?;
    let (slave_str, rest) = address.split_at(bang);
    let rest = &rest[1..]; // drop '!'

    let slave_id: u8 = slave_str.parse().map_err(|_| invalid(address))?;

    let mut chars = rest.chars();
    let area_digit = chars.next().ok_or_else(|| invalid(address))?;
    let area = Area::from_digit(area_digit as u8).ok_or_else(|| invalid(address))?;

    let after_area = chars.as_str();
    let digit_end = after_area
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(after_area.len());
    if digit_end == 0 {
        return Err(invalid(address));
    }
    let (offset_str, suffix) = after_area.split_at(digit_end);

    let raw_offset: u32 = offset_str.parse().map_err(|_| invalid(address))?;
    if raw_offset > 65536 {
        return Err(invalid(address));
    }

    let option = parse_option_suffix(suffix)?;

    Ok((
        RawAddress {
            slave_id,
            area,
            raw_offset,
        },
        option,
    ))
}

fn invalid(address: &str) -> Error {
    Error::AddressFormatInvalid(format!("malformed address {address:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::BitOption;

    #[test]
    fn parses_holding_register_address() {
        let (raw, option) = parse("1!40001").unwrap();
        assert_eq!(raw.slave_id, 1);
        assert_eq!(raw.area, Area::HoldRegister);
        assert_eq!(raw.raw_offset, 1);
        assert_eq!(option, AddressOption::None);
    }

    #[test]
    fn parses_coil_address() {
        let (raw, _) = parse("1!00001").unwrap();
        assert_eq!(raw.area, Area::Coil);
        assert_eq!(raw.raw_offset, 1);
    }

    #[test]
    fn parses_discrete_input_address() {
        let (raw, _) = parse("1!10001").unwrap();
        assert_eq!(raw.area, Area::DiscreteInput);
    }

    #[test]
    fn parses_offset_at_upper_bound() {
        let (raw, _) = parse("1!365536").unwrap();
        assert_eq!(raw.raw_offset, 65536);
    }

    #[test]
    fn parses_address_with_option_suffix() {
        let (raw, option) = parse("1!40001.bit=3").unwrap();
        assert_eq!(raw.raw_offset, 1);
        assert_eq!(option.bit(), Some(BitOption { bit_index: 3 }));
    }

    #[test]
    fn rejects_bad_area_digit() {
        assert!(parse("1!20001").is_err());
    }

    #[test]
    fn rejects_missing_bang() {
        assert!(parse("140001").is_err());
    }

    #[test]
    fn rejects_non_numeric_slave() {
        assert!(parse("x!40001").is_err());
    }

    #[test]
    fn rejects_missing_offset() {
        assert!(parse("1!4").is_err());
    }

    #[test]
    fn rejects_offset_beyond_range() {
        assert!(parse("1!465537").is_err());
    }

    #[test]
    fn rejects_bad_option_suffix() {
        assert!(parse("1!40001.garbage").is_err());
    }

    #[test]
    fn base_adjustment_zero_wraps_65536() {
        assert_eq!(AddressBase::Zero.adjust(65536), 65535);
        assert_eq!(AddressBase::Zero.adjust(0), 0);
        assert_eq!(AddressBase::Zero.adjust(100), 100);
    }

    #[test]
    fn base_adjustment_one_keeps_zero() {
        assert_eq!(AddressBase::One.adjust(0), 0);
        assert_eq!(AddressBase::One.adjust(1), 0);
        assert_eq!(AddressBase::One.adjust(40001), 40000);
    }
}
