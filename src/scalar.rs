// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scalar types a compiled [`crate::point::Point`] can carry.

/// The closed set of scalar types a tag can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    Bit,
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Word,
    Int32,
    Uint32,
    Float,
    Dword,
    Time,
    DateTime,
    Int64,
    Uint64,
    Double,
    Lword,
    String,
    Bytes,
    Ptr,
}

impl ScalarType {
    /// `true` for the fixed-width 32-bit scalars that take a
    /// [`crate::endian::Endianness32`] selector.
    #[must_use]
    pub const fn is_32_bit(self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Uint32 | Self::Float | Self::Dword | Self::Time | Self::DateTime
        )
    }

    /// `true` for the fixed-width 64-bit scalars that take a
    /// [`crate::endian::Endianness64`] selector.
    #[must_use]
    pub const fn is_64_bit(self) -> bool {
        matches!(self, Self::Int64 | Self::Uint64 | Self::Double | Self::Lword)
    }

    /// `true` for the fixed-width 16-bit scalars.
    #[must_use]
    pub const fn is_16_bit(self) -> bool {
        matches!(self, Self::Int16 | Self::Uint16 | Self::Word)
    }

    /// `true` for the single-register scalars that carry no option data.
    #[must_use]
    pub const fn is_single_register_scalar(self) -> bool {
        matches!(self, Self::Bit | Self::Bool | Self::Int8 | Self::Uint8 | Self::Ptr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_classification_is_disjoint() {
        let all = [
            ScalarType::Bit,
            ScalarType::Bool,
            ScalarType::Int8,
            ScalarType::Uint8,
            ScalarType::Int16,
            ScalarType::Uint16,
            ScalarType::Word,
            ScalarType::Int32,
            ScalarType::Uint32,
            ScalarType::Float,
            ScalarType::Dword,
            ScalarType::Time,
            ScalarType::DateTime,
            ScalarType::Int64,
            ScalarType::Uint64,
            ScalarType::Double,
            ScalarType::Lword,
            ScalarType::String,
            ScalarType::Bytes,
            ScalarType::Ptr,
        ];
        for ty in all {
            let flags = [
                ty.is_single_register_scalar(),
                ty.is_16_bit(),
                ty.is_32_bit(),
                ty.is_64_bit(),
            ];
            assert!(flags.iter().filter(|b| **b).count() <= 1, "{ty:?} set more than one width flag");
        }
    }
}
