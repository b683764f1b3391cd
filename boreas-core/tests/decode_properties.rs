//! Property tests for calibration decode and compensation
//!
//! The decoder and compensator must be deterministic and total: any byte
//! image of the right length decodes, any decoded set compensates any raw
//! count without panicking, and the structural properties (bit widths,
//! humidity clamp, profile omission) hold for every input.

use boreas_core::{compensate, CalibrationSet, RawSample, SensorKind};
use proptest::prelude::*;

proptest! {
    #[test]
    fn decode_is_deterministic(
        cal1 in any::<[u8; 24]>(),
        cal2 in any::<[u8; 1]>(),
        cal3 in any::<[u8; 7]>(),
    ) {
        let first = CalibrationSet::decode(&cal1, &cal2, &cal3).unwrap();
        let second = CalibrationSet::decode(&cal1, &cal2, &cal3).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn h4_h5_stay_inside_twelve_bits(cal3 in any::<[u8; 7]>()) {
        let cal = CalibrationSet::decode(&[0u8; 24], &[0u8], &cal3).unwrap();
        prop_assert!((-2048..=2047).contains(&cal.h4));
        prop_assert!((-2048..=2047).contains(&cal.h5));
    }

    #[test]
    fn compensate_is_pure_and_total(
        cal1 in any::<[u8; 24]>(),
        cal2 in any::<[u8; 1]>(),
        cal3 in any::<[u8; 7]>(),
        pressure in 0u32..=0xFFFFF,
        temperature in 0u32..=0xFFFFF,
        humidity in proptest::option::of(any::<u16>()),
    ) {
        let cal = CalibrationSet::decode(&cal1, &cal2, &cal3).unwrap();
        let raw = RawSample { pressure, temperature, humidity };

        let first = compensate(&raw, &cal);
        let second = compensate(&raw, &cal);
        prop_assert_eq!(first, second);

        // Humidity rides along only when the sample carries it, and the
        // clamp holds for every trim/count combination
        prop_assert_eq!(first.humidity_percent.is_some(), humidity.is_some());
        if let Some(percent) = first.humidity_percent {
            prop_assert!(percent <= 100);
        }
    }

    #[test]
    fn unpacked_counts_respect_field_widths(data in any::<[u8; 8]>()) {
        let raw = RawSample::unpack(&data, SensorKind::Bme280);
        prop_assert!(raw.pressure <= 0xFFFFF);
        prop_assert!(raw.temperature <= 0xFFFFF);
        prop_assert!(raw.humidity.is_some());
    }
}
