//! Raw count to physical value conversion
//!
//! Implements the Bosch compensation formulas: integer fixed-point for
//! temperature, the "double precision" variants for pressure and humidity.
//! Temperature always runs first because its intermediate fine-temperature
//! value feeds both other channels; [`compensate`] sequences that internally
//! so callers cannot get the order wrong.
//!
//! The whole module is pure arithmetic with no I/O. Identical inputs
//! produce bit-identical outputs, and no input can make it fail.
//! The only special cases are corrections, not errors: a zero denominator
//! in the pressure refinement reports 0 pressure, and humidity is truncated
//! and clamped to 0..=100.

use crate::calibration::CalibrationSet;
use crate::sample::{CompensatedReading, RawSample};

/// Convert one raw sample into calibrated physical values
///
/// Humidity is computed only when the sample carries a humidity count, so
/// pressure/temperature-only profiles flow through unchanged.
pub fn compensate(raw: &RawSample, cal: &CalibrationSet) -> CompensatedReading {
    let t_fine = fine_temperature(raw.temperature, cal);
    let temperature_c = ((t_fine * 5 + 128) >> 8) as f64 / 100.0;
    let pressure_hpa = compensate_pressure(raw.pressure, t_fine, cal);
    let humidity_percent = raw
        .humidity
        .map(|count| compensate_humidity(count, t_fine, cal));

    CompensatedReading {
        temperature_c,
        pressure_hpa,
        humidity_percent,
    }
}

/// Fixed-point fine-temperature refinement
///
/// Widened to i64: the squared term alone can reach 2^32 for hostile
/// calibration/count combinations, and every shift must stay arithmetic on
/// negative intermediates.
fn fine_temperature(count: u32, cal: &CalibrationSet) -> i64 {
    let adc_t = count as i64;
    let t1 = cal.t1 as i64;
    let t2 = cal.t2 as i64;
    let t3 = cal.t3 as i64;

    let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
    let var2 = ((((adc_t >> 4) - t1) * ((adc_t >> 4) - t1)) >> 12) * t3 >> 14;
    var1 + var2
}

fn compensate_pressure(count: u32, t_fine: i64, cal: &CalibrationSet) -> f64 {
    let mut var1 = t_fine as f64 / 2.0 - 64000.0;
    let mut var2 = var1 * var1 * cal.p6 as f64 / 32768.0;
    var2 += var1 * cal.p5 as f64 * 2.0;
    var2 = var2 / 4.0 + cal.p4 as f64 * 65536.0;
    var1 = (cal.p3 as f64 * var1 * var1 / 524288.0 + cal.p2 as f64 * var1) / 524288.0;
    var1 = (1.0 + var1 / 32768.0) * cal.p1 as f64;

    // Degenerate trim data would divide by zero here; the sensor convention
    // is to report 0 pressure instead.
    if var1 == 0.0 {
        return 0.0;
    }

    let mut pressure = 1048576.0 - count as f64;
    pressure = (pressure - var2 / 4096.0) * 6250.0 / var1;
    var1 = cal.p9 as f64 * pressure * pressure / 2147483648.0;
    var2 = pressure * cal.p8 as f64 / 32768.0;
    pressure += (var1 + var2 + cal.p7 as f64) / 16.0;

    // Whole pascals, then hPa
    (pressure as i64) as f64 / 100.0
}

fn compensate_humidity(count: u16, t_fine: i64, cal: &CalibrationSet) -> u8 {
    let var_h = t_fine as f64 - 76800.0;
    let var_h = (count as f64 - (cal.h4 as f64 * 64.0 + cal.h5 as f64 / 16384.0 * var_h))
        * (cal.h2 as f64 / 65536.0
            * (1.0
                + cal.h6 as f64 / 67108864.0
                    * var_h
                    * (1.0 + cal.h3 as f64 / 67108864.0 * var_h)));
    let humidity = var_h * (1.0 - cal.h1 as f64 * var_h / 524288.0);

    (humidity as i64).clamp(0, 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::SensorKind;
    use crate::sample::RawSample;

    /// Datasheet example trim values for temperature and pressure
    fn datasheet_cal() -> CalibrationSet {
        CalibrationSet {
            t1: 27504,
            t2: 26435,
            t3: -1000,
            p1: 36477,
            p2: -10685,
            p3: 3024,
            p4: 2855,
            p5: 140,
            p6: -7,
            p7: 15500,
            p8: -14600,
            p9: 6000,
            h1: 0,
            h2: 0,
            h3: 0,
            h4: 0,
            h5: 0,
            h6: 0,
        }
    }

    /// Trim values chosen so t_fine lands exactly on 76800 for count 614400,
    /// collapsing the humidity formula to count/4 when only H2 is set
    fn engineered_humidity_cal(h4: i16) -> CalibrationSet {
        CalibrationSet {
            t1: 0,
            t2: 2048,
            t3: 0,
            p1: 0,
            p2: 0,
            p3: 0,
            p4: 0,
            p5: 0,
            p6: 0,
            p7: 0,
            p8: 0,
            p9: 0,
            h1: 0,
            h2: 16384,
            h3: 0,
            h4,
            h5: 0,
            h6: 0,
        }
    }

    #[test]
    fn datasheet_temperature_vector() {
        let raw = RawSample {
            pressure: 0,
            temperature: 519888,
            humidity: None,
        };
        let reading = compensate(&raw, &datasheet_cal());
        // t_fine = 128793 + (-371) = 128422 -> 25.08 C
        assert!((reading.temperature_c - 25.08).abs() < 0.005);
    }

    #[test]
    fn negative_temperature_uses_arithmetic_shifts() {
        let raw = RawSample {
            pressure: 0,
            temperature: 0,
            humidity: None,
        };
        let reading = compensate(&raw, &datasheet_cal());
        // t_fine = -710028 - 11273 = -721301, shifted down with floor
        assert!((reading.temperature_c - (-140.88)).abs() < 0.005);
    }

    #[test]
    fn pressure_with_unit_denominator_is_exact() {
        // p1 = 6250 and p2..p9 = 0 reduce the refinement to
        // 1048576 - count pascals, independent of t_fine
        let cal = CalibrationSet {
            p1: 6250,
            p2: 0,
            p3: 0,
            p4: 0,
            p5: 0,
            p6: 0,
            p7: 0,
            p8: 0,
            p9: 0,
            ..datasheet_cal()
        };
        let raw = RawSample {
            pressure: 948576,
            temperature: 519888,
            humidity: None,
        };
        let reading = compensate(&raw, &cal);
        assert_eq!(reading.pressure_hpa, 1000.0);
    }

    #[test]
    fn zero_denominator_reports_zero_pressure() {
        let cal = CalibrationSet {
            p1: 0,
            p2: 0,
            p3: 0,
            ..datasheet_cal()
        };
        let raw = RawSample {
            pressure: 415148,
            temperature: 519888,
            humidity: None,
        };
        let reading = compensate(&raw, &cal);
        assert_eq!(reading.pressure_hpa, 0.0);
    }

    #[test]
    fn humidity_mid_scale_is_exact() {
        let raw = RawSample {
            pressure: 0,
            temperature: 614400,
            humidity: Some(200),
        };
        let reading = compensate(&raw, &engineered_humidity_cal(0));
        // 200 / 4 = 50 %
        assert_eq!(reading.humidity_percent, Some(50));
        // and the engineered t_fine gives 15.00 C
        assert!((reading.temperature_c - 15.0).abs() < 0.005);
    }

    #[test]
    fn humidity_clamps_high() {
        let raw = RawSample {
            pressure: 0,
            temperature: 614400,
            humidity: Some(444),
        };
        let reading = compensate(&raw, &engineered_humidity_cal(0));
        // would be 111 %
        assert_eq!(reading.humidity_percent, Some(100));
    }

    #[test]
    fn humidity_clamps_low() {
        let raw = RawSample {
            pressure: 0,
            temperature: 614400,
            humidity: Some(0),
        };
        let reading = compensate(&raw, &engineered_humidity_cal(10));
        // would be -160 %
        assert_eq!(reading.humidity_percent, Some(0));
    }

    #[test]
    fn humidity_absent_stays_absent() {
        let raw = RawSample::unpack(
            &[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x66, 0x02],
            SensorKind::Bmp280,
        );
        let reading = compensate(&raw, &datasheet_cal());
        assert_eq!(reading.humidity_percent, None);
    }
}
