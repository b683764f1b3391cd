//! Shared fixtures for integration tests
//!
//! One captured-style sensor image used across the suites: datasheet example
//! temperature trim, a pressure trim chosen so the refinement collapses to
//! an exactly checkable value, and a humidity trim that reduces to count/4.
//! The expected outputs are derived by hand from the reference formulas, so
//! the end-to-end assertions have no tolerance fudging beyond float display.

#![allow(dead_code)]

use boreas_core::{registers, CalibrationSet, MockTransport};

/// Device address used by every scripted session
pub const DEVICE: u8 = 0x76;

/// Identity bytes: BME280 chip id, revision 0
pub const IDENTITY: [u8; 2] = [0x60, 0x00];

/// Temperature/pressure calibration block at 0x88
///
/// T1 = 27504, T2 = 26435, T3 = -1000 (datasheet example values),
/// P1 = 6250, P2..P9 = 0 so compensated pressure is exactly
/// `1048576 - count` pascals.
pub fn fixture_cal1() -> [u8; 24] {
    let mut cal1 = [0u8; 24];
    cal1[0..2].copy_from_slice(&27504u16.to_le_bytes());
    cal1[2..4].copy_from_slice(&26435i16.to_le_bytes());
    cal1[4..6].copy_from_slice(&(-1000i16).to_le_bytes());
    cal1[6..8].copy_from_slice(&6250u16.to_le_bytes());
    cal1
}

/// Humidity calibration byte at 0xA1: H1 = 0
pub fn fixture_cal2() -> [u8; 1] {
    [0]
}

/// Humidity calibration block at 0xE1: H2 = 16384, everything else 0,
/// reducing the humidity formula to `count / 4`
pub fn fixture_cal3() -> [u8; 7] {
    let mut cal3 = [0u8; 7];
    cal3[0..2].copy_from_slice(&16384i16.to_le_bytes());
    cal3
}

/// Data burst at 0xF7
///
/// Pressure count 948576 (0xE7960), temperature count 519888 (0x7EED0),
/// humidity count 195. With the fixture trim this compensates to
/// 25.08 °C, exactly 1000.00 hPa and 48 % humidity.
pub fn fixture_data() -> [u8; 8] {
    [0xE7, 0x96, 0x00, 0x7E, 0xED, 0x00, 0x00, 0xC3]
}

/// The fixture trim as a decoded set
pub fn fixture_calibration() -> CalibrationSet {
    CalibrationSet::decode(&fixture_cal1(), &fixture_cal2(), &fixture_cal3())
        .expect("fixture blocks are well formed")
}

/// Script for session construction: identity plus the three trim blocks
pub fn session_script() -> MockTransport {
    MockTransport::new(DEVICE)
        .expect_read(registers::ID, &IDENTITY)
        .expect_read(registers::CALIB_TEMP_PRESS, &fixture_cal1())
        .expect_read(registers::CALIB_HUM_BYTE, &fixture_cal2())
        .expect_read(registers::CALIB_HUM_BLOCK, &fixture_cal3())
}

/// Script for one full default-config cycle on top of the session reads
pub fn full_cycle_script() -> MockTransport {
    session_script()
        .expect_write(registers::CTRL_HUM, 0x02)
        .expect_write(registers::CTRL_MEAS, 0x49)
        .expect_read(registers::DATA, &fixture_data())
}
