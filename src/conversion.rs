//! Turning the ADS1118's data word into a voltage or temperature.

use crate::bits::{Word, bits_to_int, invert};
use crate::config::{AdcConfig, TEMPERATURE_LSB};

/// A reading resolved to physical units.
///
/// Which variant is produced depends on the temperature sensor bit of the
/// configuration the reading was taken with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measurement {
    /// Input voltage, in volts.
    Voltage(f64),
    /// Temperature of the ADS1118 die, in °C.
    Temperature(f64),
}

impl Measurement {
    /// The reading without its unit.
    pub fn value(self) -> f64 {
        match self {
            Measurement::Voltage(v) | Measurement::Temperature(v) => v,
        }
    }

    /// The voltage, if this is a voltage reading.
    pub fn voltage(self) -> Option<f64> {
        match self {
            Measurement::Voltage(v) => Some(v),
            Measurement::Temperature(_) => None,
        }
    }

    /// The temperature, if this is a temperature reading.
    pub fn temperature(self) -> Option<f64> {
        match self {
            Measurement::Temperature(t) => Some(t),
            Measurement::Voltage(_) => None,
        }
    }
}

/// Interpret a two's-complement bit sequence of any width, scaled by `lsb_size`.
///
/// ```rust
/// # use ads1118_hal::conversion::decode;
/// assert_eq!(decode(&[false, true, false, true], 1.0), 5.0);
/// assert_eq!(decode(&[true, false, true, true], 1.0), -5.0);
/// ```
///
/// # Panics
///
/// An empty sequence, or one longer than 64 bits, will fail an assertion.
pub fn decode(bits: &[bool], lsb_size: f64) -> f64 {
    assert!(!bits.is_empty(), "Cannot decode an empty bit sequence.");
    if bits[0] {
        // Negative: the magnitude is the inverted pattern plus one.
        -lsb_size * (bits_to_int(&invert(bits)) as f64 + 1.0)
    } else {
        lsb_size * bits_to_int(bits) as f64
    }
}

/// Convert a data word according to the configuration it was read with.
///
/// Internal temperature readings are the top 14 bits of the word in steps of
/// 0.031 25 °C. Voltage readings use all 16 bits and the LSB size of the gain.
pub fn interpret(config: &AdcConfig, data: &Word) -> Measurement {
    if config.temp_sensor {
        Measurement::Temperature(decode(&data[..14], TEMPERATURE_LSB))
    } else {
        Measurement::Voltage(decode(data, config.gain.lsb_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::word_from_u16;
    use crate::config::Gain;

    #[test]
    fn extremes_of_sixteen_bits() {
        let lsb = Gain::V2_048.lsb_size();
        assert_eq!(decode(&word_from_u16(0x7FFF), lsb), 32_767.0 * lsb);
        assert_eq!(decode(&word_from_u16(0x8000), lsb), -2.048);
        assert_eq!(decode(&word_from_u16(0xFFFF), lsb), -lsb);
        assert_eq!(decode(&word_from_u16(0x0000), lsb), 0.0);
    }

    #[test]
    fn temperature_uses_fourteen_bits() {
        // 25 °C is 800 steps, left-justified by two bits.
        let data = word_from_u16(800 << 2 | 0b11);
        let measurement = interpret(&AdcConfig::INTERNAL_TEMPERATURE, &data);
        assert_eq!(measurement, Measurement::Temperature(25.0));

        // -0.25 °C is the 14-bit pattern 0x3FF8.
        let data = word_from_u16(0x3FF8 << 2);
        assert_eq!(
            interpret(&AdcConfig::INTERNAL_TEMPERATURE, &data),
            Measurement::Temperature(-0.25)
        );
    }

    #[test]
    fn voltage_scales_by_gain() {
        let data = word_from_u16(0x1000);
        let config = AdcConfig::new().with_gain(Gain::V0_256);
        let volts = interpret(&config, &data).voltage().unwrap();
        assert!((volts - 0.032).abs() < 1e-12);
        assert_eq!(interpret(&config, &data).temperature(), None);
    }
}
