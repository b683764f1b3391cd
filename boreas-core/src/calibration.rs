//! Factory calibration decoding
//!
//! Every chip ships with 18 trim coefficients burned into EEPROM, spread
//! over three register blocks: 24 bytes at 0x88 (temperature and pressure),
//! one byte at 0xA1 and seven bytes at 0xE1 (humidity). All multi-byte
//! fields are little-endian. H4 and H5 are the troublesome pair: two 12-bit
//! signed values packed into three bytes with a shared middle byte, one
//! nibble each.

use crate::errors::{SensorError, SensorResult};
use crate::registers::{
    CALIB_HUM_BLOCK, CALIB_HUM_BLOCK_LEN, CALIB_HUM_BYTE, CALIB_HUM_BYTE_LEN,
    CALIB_TEMP_PRESS, CALIB_TEMP_PRESS_LEN,
};

/// The 18 trim coefficients, decoded once per session
///
/// Field names follow the datasheet dig_* table. Values never change while
/// the chip is powered, so the sequencer reads them once and shares the set
/// with every compensation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationSet {
    /// dig_T1
    pub t1: u16,
    /// dig_T2
    pub t2: i16,
    /// dig_T3
    pub t3: i16,
    /// dig_P1
    pub p1: u16,
    /// dig_P2
    pub p2: i16,
    /// dig_P3
    pub p3: i16,
    /// dig_P4
    pub p4: i16,
    /// dig_P5
    pub p5: i16,
    /// dig_P6
    pub p6: i16,
    /// dig_P7
    pub p7: i16,
    /// dig_P8
    pub p8: i16,
    /// dig_P9
    pub p9: i16,
    /// dig_H1
    pub h1: u8,
    /// dig_H2
    pub h2: i16,
    /// dig_H3
    pub h3: u8,
    /// dig_H4, 12-bit signed from cal3[3] and the low nibble of cal3[4]
    pub h4: i16,
    /// dig_H5, 12-bit signed from cal3[5] and the high nibble of cal3[4]
    pub h5: i16,
    /// dig_H6
    pub h6: i8,
}

impl CalibrationSet {
    /// Decode the three EEPROM blocks into a coefficient set
    ///
    /// `cal1` is the 24-byte block at 0x88, `cal2` the single byte at 0xA1,
    /// `cal3` the 7-byte block at 0xE1. A block shorter than its layout
    /// fails with [`SensorError::CalibrationTruncated`]; extra trailing
    /// bytes are ignored.
    pub fn decode(cal1: &[u8], cal2: &[u8], cal3: &[u8]) -> SensorResult<Self> {
        check_len(cal1, CALIB_TEMP_PRESS, CALIB_TEMP_PRESS_LEN)?;
        check_len(cal2, CALIB_HUM_BYTE, CALIB_HUM_BYTE_LEN)?;
        check_len(cal3, CALIB_HUM_BLOCK, CALIB_HUM_BLOCK_LEN)?;

        Ok(Self {
            t1: read_u16(cal1, 0),
            t2: read_i16(cal1, 2),
            t3: read_i16(cal1, 4),
            p1: read_u16(cal1, 6),
            p2: read_i16(cal1, 8),
            p3: read_i16(cal1, 10),
            p4: read_i16(cal1, 12),
            p5: read_i16(cal1, 14),
            p6: read_i16(cal1, 16),
            p7: read_i16(cal1, 18),
            p8: read_i16(cal1, 20),
            p9: read_i16(cal1, 22),
            h1: cal2[0],
            h2: read_i16(cal3, 0),
            h3: cal3[2],
            h4: sign_extend((cal3[3] as u16) << 4 | (cal3[4] & 0x0F) as u16, 12),
            h5: sign_extend((cal3[5] as u16) << 4 | (cal3[4] >> 4) as u16, 12),
            h6: cal3[6] as i8,
        })
    }
}

fn check_len(block: &[u8], register: u8, expected: usize) -> SensorResult<()> {
    if block.len() < expected {
        return Err(SensorError::CalibrationTruncated {
            register,
            expected: expected as u8,
            actual: block.len() as u8,
        });
    }
    Ok(())
}

fn read_u16(block: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([block[offset], block[offset + 1]])
}

fn read_i16(block: &[u8], offset: usize) -> i16 {
    i16::from_le_bytes([block[offset], block[offset + 1]])
}

/// Reinterpret the low `bits` bits of `raw` as a two's-complement value
///
/// Shift the field up against the sign bit, then arithmetic-shift back down.
/// Valid for widths 1..=16; the decoder uses it for the 12-bit H4/H5 fields.
fn sign_extend(raw: u16, bits: u32) -> i16 {
    let shift = 16 - bits;
    ((raw << shift) as i16) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_extend_twelve_bit() {
        assert_eq!(sign_extend(0x000, 12), 0);
        assert_eq!(sign_extend(0x005, 12), 5);
        assert_eq!(sign_extend(0x7FF, 12), 2047);
        assert_eq!(sign_extend(0x800, 12), -2048);
        assert_eq!(sign_extend(0xFFB, 12), -5);
    }

    #[test]
    fn sign_extend_other_widths() {
        assert_eq!(sign_extend(0xFF, 8), -1);
        assert_eq!(sign_extend(0x7F, 8), 127);
        assert_eq!(sign_extend(0xFFFF, 16), -1);
    }

    #[test]
    fn h4_h5_share_the_middle_byte() {
        // H4 = cal3[3] ++ low nibble of cal3[4], H5 = cal3[5] ++ high nibble
        let cal1 = [0u8; 24];
        let cal2 = [0u8];
        let cal3 = [0x00, 0x00, 0x00, 0xFF, 0xAB, 0x03, 0x00];

        let cal = CalibrationSet::decode(&cal1, &cal2, &cal3).unwrap();
        // 0xFFB sign-extends to -5, never 4091
        assert_eq!(cal.h4, -5);
        // 0x03A stays positive
        assert_eq!(cal.h5, 58);
    }

    #[test]
    fn decode_reads_datasheet_offsets() {
        let mut cal1 = [0u8; 24];
        let pairs: [(usize, i32); 12] = [
            (0, 27504),
            (2, 26435),
            (4, -1000),
            (6, 36477),
            (8, -10685),
            (10, 3024),
            (12, 2855),
            (14, 140),
            (16, -7),
            (18, 15500),
            (20, -14600),
            (22, 6000),
        ];
        for (offset, value) in pairs {
            cal1[offset..offset + 2].copy_from_slice(&(value as u16).to_le_bytes());
        }
        let cal2 = [75u8];
        let mut cal3 = [0u8; 7];
        cal3[0..2].copy_from_slice(&360i16.to_le_bytes());
        cal3[2] = 0;
        cal3[3] = 0x14; // H4 = 0x14A = 330
        cal3[4] = 0x2A; // shared byte: low nibble H4, high nibble H5
        cal3[5] = 0x03; // H5 = 0x032 = 50
        cal3[6] = 30;

        let cal = CalibrationSet::decode(&cal1, &cal2, &cal3).unwrap();
        assert_eq!(cal.t1, 27504);
        assert_eq!(cal.t2, 26435);
        assert_eq!(cal.t3, -1000);
        assert_eq!(cal.p1, 36477);
        assert_eq!(cal.p2, -10685);
        assert_eq!(cal.p9, 6000);
        assert_eq!(cal.h1, 75);
        assert_eq!(cal.h2, 360);
        assert_eq!(cal.h3, 0);
        assert_eq!(cal.h4, 330);
        assert_eq!(cal.h5, 50);
        assert_eq!(cal.h6, 30);
    }

    #[test]
    fn decode_rejects_short_blocks() {
        let cal1 = [0u8; 24];
        let cal2 = [0u8];
        let cal3 = [0u8; 7];

        assert_eq!(
            CalibrationSet::decode(&cal1[..23], &cal2, &cal3),
            Err(SensorError::CalibrationTruncated {
                register: CALIB_TEMP_PRESS,
                expected: 24,
                actual: 23,
            })
        );
        assert_eq!(
            CalibrationSet::decode(&cal1, &[], &cal3),
            Err(SensorError::CalibrationTruncated {
                register: CALIB_HUM_BYTE,
                expected: 1,
                actual: 0,
            })
        );
        assert_eq!(
            CalibrationSet::decode(&cal1, &cal2, &cal3[..6]),
            Err(SensorError::CalibrationTruncated {
                register: CALIB_HUM_BLOCK,
                expected: 7,
                actual: 6,
            })
        );
    }
}
