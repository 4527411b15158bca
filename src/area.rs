// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The four Modbus address spaces.

use core::fmt;

/// One of the four Modbus data areas.
///
/// Coils and discrete inputs are bit-addressed; the two register areas are
/// addressed in 16-bit words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Area {
    /// Function codes `01`/`05`/`0F`. Read-write, bit-addressed.
    Coil,
    /// Function code `02`. Read-only, bit-addressed.
    DiscreteInput,
    /// Function code `04`. Read-only, word-addressed.
    InputRegister,
    /// Function codes `03`/`06`/`10`. Read-write, word-addressed.
    HoldRegister,
}

impl Area {
    /// Parse the single address-digit that selects an area: `'0'`, `'1'`,
    /// `'3'`, or `'4'`.
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            b'0' => Some(Self::Coil),
            b'1' => Some(Self::DiscreteInput),
            b'3' => Some(Self::InputRegister),
            b'4' => Some(Self::HoldRegister),
            _ => None,
        }
    }

    /// `true` for [`Area::Coil`] and [`Area::DiscreteInput`]: addressed bit
    /// by bit rather than in 16-bit words.
    #[must_use]
    pub const fn is_bit_addressed(self) -> bool {
        matches!(self, Self::Coil | Self::DiscreteInput)
    }

    /// `true` for areas the device will never accept a write against.
    #[must_use]
    pub const fn is_read_only(self) -> bool {
        matches!(self, Self::DiscreteInput | Self::InputRegister)
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Coil => "coil",
            Self::DiscreteInput => "discrete_input",
            Self::InputRegister => "input_register",
            Self::HoldRegister => "hold_register",
        };
        f.write_str(name)
    }
}
