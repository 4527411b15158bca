// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use core::fmt;

use crate::area::Area;

/// modbus-tag-planner Error
///
/// Mirrors the three-way taxonomy a gateway operator needs to act on: a
/// malformed address, an attribute the target area cannot honor, or a
/// scalar type the target area cannot carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The textual address did not match `slave!area:offset[...]`, or a
    /// sub-option (bit index, string/bytes length) was out of range.
    AddressFormatInvalid(String),
    /// A writable attribute was requested on a point that cannot be written
    /// (a read-only area, or a BIT point in a register area).
    AttributeNotSupport,
    /// The scalar type is incompatible with the point's area, or unknown.
    TypeNotSupport,
    /// A single point's own register footprint already meets or exceeds the
    /// PDU byte budget, so it can never be framed as a valid command.
    OversizedPoint {
        area: Area,
        n_register: u16,
        max_byte: u16,
    },
    /// A buffer passed to a packing routine was too small.
    BufferSize,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddressFormatInvalid(detail) => {
                write!(f, "invalid address format: {detail}")
            }
            Self::AttributeNotSupport => {
                write!(f, "attribute not supported for this area/type")
            }
            Self::TypeNotSupport => write!(f, "type not supported for this area"),
            Self::OversizedPoint {
                area,
                n_register,
                max_byte,
            } => write!(
                f,
                "point requires {n_register} register(s) in area {area:?}, \
                 which alone meets or exceeds the PDU budget of {max_byte} bytes"
            ),
            Self::BufferSize => write!(f, "buffer too small"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
