// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bit-packing for the coil area, used by the Write Packer's payload
//! construction.

use crate::error::Error;

/// Pack coils into a byte array, least-significant bit first within each
/// byte. Returns the number of coils packed.
pub fn pack_coils(coils: impl IntoIterator<Item = bool>, bytes: &mut [u8]) -> Result<usize, Error> {
    let mut coil_count = 0;
    for coil in coils {
        let value = u8::from(coil);
        let Some(byte) = bytes.get_mut(coil_count / 8) else {
            return Err(Error::BufferSize);
        };
        *byte |= value << (coil_count % 8);
        coil_count += 1;
    }
    Ok(coil_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_coils_into_byte_array() {
        assert_eq!(pack_coils([], &mut []).unwrap(), 0);
        assert_eq!(
            pack_coils([true; 2], &mut []).err().unwrap(),
            Error::BufferSize
        );

        let buff = &mut [0];
        assert_eq!(pack_coils([true, false], buff).unwrap(), 2);
        assert_eq!(buff, &[0b_01]);

        let buff = &mut [0, 0];
        assert_eq!(pack_coils([true; 9], buff).unwrap(), 9);
        assert_eq!(buff, &[0xff, 1]);
    }
}
