//! Modbus tag catalog compiler and request coalescer.
//!
//! This crate turns a catalog of textual Modbus tag addresses into compiled
//! [`point::Point`]/[`point::WritePoint`] descriptors, coalesces them into
//! the minimal ordered set of read/write commands that fit a PDU byte
//! budget, and serializes write payloads with the declared endianness.
//!
//! Framing (function code, unit ID, CRC/MBAP), the transport, retry policy,
//! and tag-catalog persistence are out of scope: this crate hands the
//! caller `ReadCmd`/`WriteCmd` descriptors to frame and send.

mod address;
mod area;
mod coalesce;
mod coils;
mod endian;
mod error;
mod option;
mod pack;
mod point;
mod scalar;

pub use address::{AddressBase, RawAddress};
pub use area::Area;
pub use coalesce::{coalesce_read, coalesce_write, ReadCmd, WriteCmd};
pub use endian::{Endianness32, Endianness64};
pub use error::Error;
pub use option::{
    AddressOption, BitOption, BytesOption, StringEncoding, StringOption, Value32Option,
    Value64Option,
};
pub use pack::EndianDefaults;
pub use point::{compile_point, Attribute, Point, TagRecord, ValueUnion, WritePoint};
pub use scalar::ScalarType;
