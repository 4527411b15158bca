// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte-accurate serialization of a coalesced write run's payload.

use byteorder::{BigEndian, ByteOrder};

use crate::area::Area;
use crate::coils::pack_coils;
use crate::endian::{self, Endianness32, Endianness64};
use crate::error::Error;
use crate::option::StringEncoding;
use crate::point::{ValueUnion, WritePoint};

/// Run-level endianness defaults, used when a point's own option defers via
/// `is_default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EndianDefaults {
    pub value32: Endianness32,
    pub value64: Endianness64,
}

/// Pack one coalesced write run's payload. Returns the payload and its
/// `n_byte` length.
pub fn pack_write_run(
    area: Area,
    run_start: u16,
    tags: &[WritePoint],
    defaults: EndianDefaults,
) -> Result<(Vec<u8>, u16), Error> {
    if area.is_bit_addressed() {
        pack_coil_run(tags)
    } else {
        pack_register_run(run_start, tags, defaults)
    }
}

fn pack_coil_run(tags: &[WritePoint]) -> Result<(Vec<u8>, u16), Error> {
    let bits = tags.iter().map(|t| match &t.value {
        ValueUnion::Bit(b) => *b,
        _ => false,
    });
    let n_byte = (tags.len() as u16).div_ceil(8);
    let mut payload = vec![0u8; n_byte as usize];
    pack_coils(bits, &mut payload)?;
    Ok((payload, n_byte))
}

fn pack_register_run(
    run_start: u16,
    tags: &[WritePoint],
    defaults: EndianDefaults,
) -> Result<(Vec<u8>, u16), Error> {
    let run_start_wide = u32::from(run_start);
    let n_register = tags
        .iter()
        .map(|t| u32::from(t.point.start_address) + u32::from(t.point.n_register) - run_start_wide)
        .max()
        .unwrap_or(0) as u16;
    let n_byte = n_register * 2;
    let mut payload = vec![0u8; n_byte as usize];

    for tag in tags {
        let byte_offset = 2 * (tag.point.start_address - run_start) as usize;
        write_point(&mut payload[byte_offset..], tag, defaults)?;
    }

    Ok((payload, n_byte))
}

fn write_point(buf: &mut [u8], tag: &WritePoint, defaults: EndianDefaults) -> Result<(), Error> {
    match &tag.value {
        ValueUnion::Bit(v) | ValueUnion::Bool(v) => {
            BigEndian::write_u16(buf, u16::from(*v));
        }
        ValueUnion::Int8(v) => BigEndian::write_u16(buf, *v as u16),
        ValueUnion::Uint8(v) | ValueUnion::Ptr(v) => BigEndian::write_u16(buf, u16::from(*v)),
        ValueUnion::Int16(v) => BigEndian::write_u16(buf, *v as u16),
        ValueUnion::Uint16(v) | ValueUnion::Word(v) => BigEndian::write_u16(buf, *v),
        ValueUnion::Int32(v) => write_32(buf, (*v as u32).to_be_bytes(), tag, defaults),
        ValueUnion::Uint32(v) | ValueUnion::Dword(v) | ValueUnion::Time(v) | ValueUnion::DateTime(v) => {
            write_32(buf, v.to_be_bytes(), tag, defaults);
        }
        ValueUnion::Float(v) => write_32(buf, v.to_bits().to_be_bytes(), tag, defaults),
        ValueUnion::Int64(v) => write_64(buf, (*v as u64).to_be_bytes(), tag, defaults),
        ValueUnion::Uint64(v) | ValueUnion::Lword(v) => write_64(buf, v.to_be_bytes(), tag, defaults),
        ValueUnion::Double(v) => write_64(buf, v.to_bits().to_be_bytes(), tag, defaults),
        ValueUnion::String(bytes) => write_string(buf, bytes, tag)?,
        ValueUnion::Bytes(bytes) => {
            let len = bytes.len();
            if buf.len() < len {
                return Err(Error::BufferSize);
            }
            buf[..len].copy_from_slice(bytes);
        }
    }
    Ok(())
}

fn write_32(buf: &mut [u8], native_be: [u8; 4], tag: &WritePoint, defaults: EndianDefaults) {
    let endianness = tag
        .point
        .option
        .value32()
        .map(|v| if v.is_default { defaults.value32 } else { v.endianness })
        .unwrap_or(defaults.value32);
    let swapped = endian::apply_32(native_be, endianness);
    buf[..4].copy_from_slice(&swapped);
}

fn write_64(buf: &mut [u8], native_be: [u8; 8], tag: &WritePoint, defaults: EndianDefaults) {
    let endianness = tag
        .point
        .option
        .value64()
        .map(|v| if v.is_default { defaults.value64 } else { v.endianness })
        .unwrap_or(defaults.value64);
    let swapped = endian::apply_64(native_be, endianness);
    buf[..8].copy_from_slice(&swapped);
}

fn write_string(buf: &mut [u8], chars: &[u8], tag: &WritePoint) -> Result<(), Error> {
    let opt = tag
        .point
        .option
        .string()
        .ok_or(Error::BufferSize)?;
    let length = usize::from(opt.length);
    let n_register = match opt.encoding {
        StringEncoding::D | StringEncoding::E => length,
        StringEncoding::H | StringEncoding::L => length.div_ceil(2),
    };
    if buf.len() < n_register * 2 {
        return Err(Error::BufferSize);
    }
    let byte_at = |i: usize| chars.get(i).copied().unwrap_or(0);

    match opt.encoding {
        StringEncoding::H => {
            for i in 0..length {
                buf[i] = byte_at(i);
            }
        }
        StringEncoding::L => {
            for pair in 0..length.div_ceil(2) {
                let hi = byte_at(pair * 2);
                let lo = byte_at(pair * 2 + 1);
                buf[pair * 2] = lo;
                buf[pair * 2 + 1] = hi;
            }
        }
        StringEncoding::D => {
            for i in 0..length {
                buf[i * 2] = 0;
                buf[i * 2 + 1] = byte_at(i);
            }
        }
        StringEncoding::E => {
            for i in 0..length {
                buf[i * 2] = byte_at(i);
                buf[i * 2 + 1] = 0;
            }
        }
    }
    Ok(())
}
