// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled point descriptors and the tag → point compiler.

use crate::address::{self, AddressBase};
use crate::area::Area;
use crate::error::Error;
use crate::option::AddressOption;
use crate::scalar::ScalarType;

bitflags::bitflags! {
    /// Read/write capability flags carried by a tag record.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Attribute: u8 {
        const READ = 0b01;
        const WRITE = 0b10;
    }
}

/// The input a catalog hands the Parser: an opaque identifier, the textual
/// address, the declared scalar type, and the capability flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub name: String,
    pub address: String,
    pub r#type: ScalarType,
    pub attribute: Attribute,
}

impl TagRecord {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        r#type: ScalarType,
        attribute: Attribute,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            r#type,
            attribute,
        }
    }
}

/// A compiled, typed descriptor of one addressable datum inside a slave's
/// memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Point {
    pub slave_id: u8,
    pub area: Area,
    pub start_address: u16,
    pub n_register: u16,
    pub r#type: ScalarType,
    pub option: AddressOption,
    pub name: String,
}

impl Point {
    /// Exclusive end of this point's register range, in register units.
    /// Widened to `u32`: a point may legally end at register `65536`, one
    /// past the last `u16` address.
    #[must_use]
    pub const fn end_address(&self) -> u32 {
        self.start_address as u32 + self.n_register as u32
    }
}

/// The value carried by a [`WritePoint`], tagged by the same [`ScalarType`]
/// the point compiled against. Modeled as a discriminated enum rather than
/// the raw byte union the upstream catalog format uses, since the Write
/// Packer always knows which variant to read from `point.r#type`.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueUnion {
    Bit(bool),
    Bool(bool),
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Word(u16),
    Int32(i32),
    Uint32(u32),
    Float(f32),
    Dword(u32),
    Time(u32),
    DateTime(u32),
    Int64(i64),
    Uint64(u64),
    Double(f64),
    Lword(u64),
    /// Raw ASCII/UTF-8 bytes for a `STRING` point, already trimmed/padded to
    /// `option.string().length`.
    String(Vec<u8>),
    /// Raw bytes for a `BYTES` point, exactly `option.bytes().length` long.
    Bytes(Vec<u8>),
    Ptr(u8),
}

/// A compiled point paired with the value to be written to it.
#[derive(Debug, Clone, PartialEq)]
pub struct WritePoint {
    pub point: Point,
    pub value: ValueUnion,
}

/// Compile a [`TagRecord`] into a [`Point`], enforcing the address grammar
/// and the area × type × attribute validation matrix.
pub fn compile_point(tag: &TagRecord, base: AddressBase) -> Result<Point, Error> {
    let (raw, option) = address::parse(&tag.address)?;
    let start_address = base.adjust(raw.raw_offset);

    validate_attribute(raw.area, tag.r#type, tag.attribute)?;
    let n_register = validate_and_size(raw.area, tag.r#type, &option)?;

    if start_address as u32 + n_register as u32 > 65536 {
        return Err(Error::AddressFormatInvalid(format!(
            "point {} ({:?}) overruns the 16-bit address space",
            tag.name, tag.r#type
        )));
    }

    Ok(Point {
        slave_id: raw.slave_id,
        area: raw.area,
        start_address,
        n_register,
        r#type: tag.r#type,
        option,
        name: tag.name.clone(),
    })
}

fn validate_attribute(area: Area, ty: ScalarType, attribute: Attribute) -> Result<(), Error> {
    let writable = attribute.contains(Attribute::WRITE);
    if area.is_read_only() && writable {
        return Err(Error::AttributeNotSupport);
    }
    if !area.is_bit_addressed() && ty == ScalarType::Bit && writable {
        return Err(Error::AttributeNotSupport);
    }
    Ok(())
}

fn validate_and_size(area: Area, ty: ScalarType, option: &AddressOption) -> Result<u16, Error> {
    if area.is_bit_addressed() {
        if ty != ScalarType::Bit {
            return Err(Error::TypeNotSupport);
        }
        let bit_index = option.bit().map(|b| b.bit_index).unwrap_or(0);
        if bit_index > 7 {
            return Err(Error::AddressFormatInvalid(format!(
                "bit index {bit_index} out of range 0..=7 for {area:?}"
            )));
        }
        return Ok(1);
    }

    // Register areas (input register / hold register).
    match ty {
        ScalarType::Bit => {
            let bit_index = option.bit().map(|b| b.bit_index).unwrap_or(0);
            if bit_index > 15 {
                return Err(Error::AddressFormatInvalid(format!(
                    "bit index {bit_index} out of range 0..=15 for register BIT"
                )));
            }
            Ok(1)
        }
        ScalarType::Bool | ScalarType::Int8 | ScalarType::Uint8 | ScalarType::Ptr => Ok(1),
        ScalarType::Int16 | ScalarType::Uint16 | ScalarType::Word => Ok(1),
        ScalarType::Int32
        | ScalarType::Uint32
        | ScalarType::Float
        | ScalarType::Dword
        | ScalarType::Time
        | ScalarType::DateTime => Ok(2),
        ScalarType::Int64 | ScalarType::Uint64 | ScalarType::Double | ScalarType::Lword => Ok(4),
        ScalarType::String => {
            let string = option
                .string()
                .ok_or_else(|| Error::AddressFormatInvalid("STRING point missing string option".into()))?;
            if string.length == 0 || string.length > 127 {
                return Err(Error::AddressFormatInvalid(format!(
                    "string length {} out of range 1..=127",
                    string.length
                )));
            }
            use crate::option::StringEncoding::{D, E, H, L};
            let n_register = match string.encoding {
                H | L => u16::from(string.length).div_ceil(2),
                D | E => u16::from(string.length),
            };
            Ok(n_register)
        }
        ScalarType::Bytes => {
            let bytes = option
                .bytes()
                .ok_or_else(|| Error::AddressFormatInvalid("BYTES point missing bytes option".into()))?;
            if bytes.length == 0 || bytes.length > 128 || bytes.length % 2 != 0 {
                return Err(Error::AddressFormatInvalid(format!(
                    "bytes length {} must be even and in 2..=128",
                    bytes.length
                )));
            }
            Ok(u16::from(bytes.length).div_ceil(2))
        }
    }
}
