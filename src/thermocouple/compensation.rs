//! Cold-junction compensation with the NIST ITS-90 type K polynomials.
//!
//! Coefficients are from NIST Monograph 175 (ITS-90 thermocouple reference
//! functions).

use super::table::{millivolts_to_temperature, temperature_to_millivolts};
use crate::Error;

/// Reference function coefficients, 0 °C to 1372 °C (°C to mV).
const EMF_COEFFICIENTS: [f64; 10] = [
    -0.176_004_136_860e-01,
    0.389_212_049_750e-01,
    0.185_587_700_320e-04,
    -0.994_575_928_740e-07,
    0.318_409_457_190e-09,
    -0.560_728_448_890e-12,
    0.560_750_590_590e-15,
    -0.320_207_200_030e-18,
    0.971_511_471_520e-22,
    -0.121_047_212_750e-25,
];

/// Exponential term `a0 · exp(a1 · (t - a2)²)` of the reference function.
const EMF_EXPONENTIAL: (f64, f64, f64) = (
    0.118_597_600_000e+00,
    -0.118_343_200_000e-03,
    0.126_968_600_000e+03,
);

/// Inverse function coefficients (mV to °C) for one voltage range.
struct InverseRange {
    /// Lowest voltage the coefficients cover, in mV.
    min: f64,
    coefficients: [f64; 10],
}

/// Inverse ranges in ascending order. Each covers `min` up to the next range's
/// `min`, the last up to [`INVERSE_MAX`].
const INVERSE_RANGES: [InverseRange; 3] = [
    // -200 °C to 0 °C.
    InverseRange {
        min: -5.891,
        coefficients: [
            0.0,
            2.517_346_2e+01,
            -1.166_287_8e+00,
            -1.083_363_8e+00,
            -8.977_354_0e-01,
            -3.734_237_7e-01,
            -8.663_264_3e-02,
            -1.045_059_8e-02,
            -5.192_057_7e-04,
            0.0,
        ],
    },
    // 0 °C to 500 °C.
    InverseRange {
        min: 0.0,
        coefficients: [
            0.0,
            2.508_355e+01,
            7.860_106e-02,
            -2.503_131e-01,
            8.315_270e-02,
            -1.228_034e-02,
            9.804_036e-04,
            -4.413_030e-05,
            1.057_734e-06,
            -1.052_755e-08,
        ],
    },
    // 500 °C to 1372 °C.
    InverseRange {
        min: 20.644,
        coefficients: [
            -1.318_058e+02,
            4.830_222e+01,
            -1.646_031e+00,
            5.464_731e-02,
            -9.650_715e-04,
            8.802_193e-06,
            -3.110_810e-08,
            0.0,
            0.0,
            0.0,
        ],
    },
];

/// Upper limit of the inverse function, in mV (1372 °C).
const INVERSE_MAX: f64 = 54.886;

/// Evaluate a polynomial with coefficients in ascending order of power.
fn polynomial(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |sum, &c| sum * x + c)
}

/// Thermoelectric voltage (mV) of a type K junction at `celsius`, from the NIST
/// reference function rather than the table.
///
/// The function is defined from 0 °C to 1372 °C, which covers any sensible cold
/// junction.
pub fn cold_junction_millivolts(celsius: f64) -> f64 {
    let (a0, a1, a2) = EMF_EXPONENTIAL;
    polynomial(&EMF_COEFFICIENTS, celsius) + a0 * (a1 * (celsius - a2).powi(2)).exp()
}

/// Hot junction temperature (°C) from the cold junction temperature (°C) and the
/// thermocouple's output in volts, as measured by the ADC.
///
/// The cold junction's equivalent voltage is added to the measured voltage, and the
/// total is converted with [`inverse_millivolts`].
///
/// # Errors
///
/// [`Error::OutOfRange`] if the combined voltage is outside `[-5.891, 54.886)` mV
/// (-200 °C to 1372 °C).
pub fn linearize(cold_junction_celsius: f64, thermocouple_volts: f64) -> Result<f64, Error> {
    inverse_millivolts(cold_junction_millivolts(cold_junction_celsius) + thermocouple_volts * 1000.0)
}

/// Temperature (°C) for a total thermoelectric voltage (mV) referenced to 0 °C,
/// using the NIST inverse polynomial for the voltage's range.
///
/// The ranges are `[-5.891, 0)`, `[0, 20.644)` and `[20.644, 54.886)`, so a total
/// of exactly 20.644 mV uses the 500 °C to 1372 °C coefficients.
///
/// # Errors
///
/// [`Error::OutOfRange`] if `millivolts` is outside `[-5.891, 54.886)`.
pub fn inverse_millivolts(millivolts: f64) -> Result<f64, Error> {
    let min = INVERSE_RANGES[0].min;
    if !(min..INVERSE_MAX).contains(&millivolts) {
        return Err(Error::OutOfRange {
            value: millivolts,
            min,
            max: INVERSE_MAX,
        });
    }

    let range = INVERSE_RANGES
        .iter()
        .rev()
        .find(|range| millivolts >= range.min)
        .expect("Range check covers the lowest minimum.");
    Ok(polynomial(&range.coefficients, millivolts))
}

/// Hot junction temperature (°C) from the cold junction temperature (°C) and the
/// thermocouple's output in millivolts, using only the reference table.
///
/// This is independent of [`linearize`] and the two will not agree exactly.
///
/// ```rust
/// # use ads1118_hal::thermocouple::get_temperature;
/// // A 25 °C cold junction and 4.096 mV across the thermocouple.
/// let celsius = get_temperature(25.0, 4.096).unwrap();
/// assert!((celsius - 124.3).abs() < 0.1);
/// ```
///
/// # Errors
///
/// [`Error::OutOfRange`] if either the cold junction temperature or the combined
/// voltage falls outside the table.
pub fn get_temperature(cold_junction_celsius: f64, thermocouple_millivolts: f64) -> Result<f64, Error> {
    let cold_junction = temperature_to_millivolts(cold_junction_celsius)?;
    millivolts_to_temperature(cold_junction + thermocouple_millivolts)
}
