// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte/word permutations applied to multi-register scalars before they are
//! written in Modbus network byte order.

/// Word-swap selector for 32-bit scalars (two registers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness32 {
    /// Identity: registers and bytes stay in network order.
    #[default]
    Abcd,
    /// Swap the two 16-bit halves; bytes within each half keep their order.
    Cdab,
    /// Byte-swap each 16-bit half in place; halves stay put.
    Badc,
    /// Reverse all four bytes.
    Dcba,
}

/// Word-swap selector for 64-bit scalars (four registers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endianness64 {
    /// Identity.
    #[default]
    Ll,
    /// Full 8-byte reversal.
    Bb,
    /// Swap the two 32-bit halves, keep byte order within each half.
    Lb,
    /// Reverse bytes within each 32-bit half, keep halves in place.
    Bl,
}

/// Apply a [`Endianness32`] permutation to 4 raw bytes, already in the
/// point's native (unswapped) byte order.
#[must_use]
pub fn apply_32(bytes: [u8; 4], endianness: Endianness32) -> [u8; 4] {
    let [a, b, c, d] = bytes;
    match endianness {
        Endianness32::Abcd => [a, b, c, d],
        Endianness32::Cdab => [c, d, a, b],
        Endianness32::Badc => [b, a, d, c],
        Endianness32::Dcba => [d, c, b, a],
    }
}

/// Apply a [`Endianness64`] permutation to 8 raw bytes, already in the
/// point's native (unswapped) byte order.
#[must_use]
pub fn apply_64(bytes: [u8; 8], endianness: Endianness64) -> [u8; 8] {
    let [a, b, c, d, e, f, g, h] = bytes;
    match endianness {
        Endianness64::Ll => [a, b, c, d, e, f, g, h],
        Endianness64::Bb => [h, g, f, e, d, c, b, a],
        Endianness64::Lb => [e, f, g, h, a, b, c, d],
        Endianness64::Bl => [d, c, b, a, h, g, f, e],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_32: [u8; 4] = [0x11, 0x22, 0x33, 0x44];
    const SAMPLE_64: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];

    #[test]
    fn abcd_is_identity() {
        assert_eq!(apply_32(SAMPLE_32, Endianness32::Abcd), SAMPLE_32);
    }

    #[test]
    fn cdab_swaps_halves_and_bytes() {
        // 0x11223344 with CDAB -> 0x33,0x44,0x11,0x22
        assert_eq!(
            apply_32(SAMPLE_32, Endianness32::Cdab),
            [0x33, 0x44, 0x11, 0x22]
        );
    }

    #[test]
    fn badc_swaps_bytes_within_each_half() {
        assert_eq!(
            apply_32(SAMPLE_32, Endianness32::Badc),
            [0x22, 0x11, 0x44, 0x33]
        );
    }

    #[test]
    fn dcba_reverses_all_bytes() {
        assert_eq!(
            apply_32(SAMPLE_32, Endianness32::Dcba),
            [0x44, 0x33, 0x22, 0x11]
        );
    }

    #[test]
    fn abcd_and_dcba_are_involutions() {
        let once = apply_32(SAMPLE_32, Endianness32::Dcba);
        let twice = apply_32(once, Endianness32::Dcba);
        assert_eq!(twice, SAMPLE_32);

        let id_once = apply_32(SAMPLE_32, Endianness32::Abcd);
        let id_twice = apply_32(id_once, Endianness32::Abcd);
        assert_eq!(id_twice, SAMPLE_32);
    }

    #[test]
    fn cdab_and_badc_are_involutions() {
        let cdab_twice = apply_32(apply_32(SAMPLE_32, Endianness32::Cdab), Endianness32::Cdab);
        assert_eq!(cdab_twice, SAMPLE_32);

        let badc_twice = apply_32(apply_32(SAMPLE_32, Endianness32::Badc), Endianness32::Badc);
        assert_eq!(badc_twice, SAMPLE_32);
    }

    #[test]
    fn ll_is_identity_64() {
        assert_eq!(apply_64(SAMPLE_64, Endianness64::Ll), SAMPLE_64);
    }

    #[test]
    fn bb_reverses_all_eight_bytes() {
        assert_eq!(
            apply_64(SAMPLE_64, Endianness64::Bb),
            [8, 7, 6, 5, 4, 3, 2, 1]
        );
    }

    #[test]
    fn lb_swaps_32_bit_halves() {
        assert_eq!(
            apply_64(SAMPLE_64, Endianness64::Lb),
            [5, 6, 7, 8, 1, 2, 3, 4]
        );
    }

    #[test]
    fn bl_reverses_within_each_half() {
        assert_eq!(
            apply_64(SAMPLE_64, Endianness64::Bl),
            [4, 3, 2, 1, 8, 7, 6, 5]
        );
    }

    #[test]
    fn all_64_bit_selectors_are_involutions() {
        for e in [Endianness64::Ll, Endianness64::Bb, Endianness64::Lb, Endianness64::Bl] {
            let twice = apply_64(apply_64(SAMPLE_64, e), e);
            assert_eq!(twice, SAMPLE_64, "{e:?} is not an involution");
        }
    }
}
