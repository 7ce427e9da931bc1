//! The ADS1118 configuration register.
//!
//! Every exchange with the ADS1118 writes a 16-bit configuration word, and the
//! device echoes that word back in the second half of the same cycle. The word
//! selects the input, the programmable gain amplifier's full-scale range, the
//! data rate, and whether the internal temperature sensor is read instead.
//!
//! ## Datasheet
//!
//! See section 9.6.1.2 (Config Register) for the field layout.

use std::time::Duration;

use bit_field::BitField;

use crate::Error;
use crate::bits::{Word, word_from_u16, word_to_u16};

/// Size of one step of the internal temperature sensor, in °C.
///
/// The temperature result is 14 bits, left-justified in the 16-bit data word.
pub const TEMPERATURE_LSB: f64 = 0.031_25;

/// Input multiplexer setting.
///
/// Differential pairs come first, then single-ended inputs measured against ground.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Multiplexer {
    /// AIN0 positive, AIN1 negative (power-on default).
    #[default]
    Ain0Ain1,
    /// AIN0 positive, AIN3 negative.
    Ain0Ain3,
    /// AIN1 positive, AIN3 negative.
    Ain1Ain3,
    /// AIN2 positive, AIN3 negative.
    Ain2Ain3,
    /// AIN0 against GND.
    Ain0Gnd,
    /// AIN1 against GND.
    Ain1Gnd,
    /// AIN2 against GND.
    Ain2Gnd,
    /// AIN3 against GND.
    Ain3Gnd,
}

#[doc(hidden)]
impl From<u8> for Multiplexer {
    fn from(value: u8) -> Self {
        assert!(value <= 0b111, "Invalid bit pattern for multiplexer.");
        match value {
            0b000 => Self::Ain0Ain1,
            0b001 => Self::Ain0Ain3,
            0b010 => Self::Ain1Ain3,
            0b011 => Self::Ain2Ain3,
            0b100 => Self::Ain0Gnd,
            0b101 => Self::Ain1Gnd,
            0b110 => Self::Ain2Gnd,
            0b111 => Self::Ain3Gnd,
            _ => unreachable!("Precondition assert covers > 7."),
        }
    }
}

#[doc(hidden)]
impl From<Multiplexer> for u8 {
    fn from(value: Multiplexer) -> Self {
        value as u8
    }
}

/// Programmable gain amplifier setting, named by full-scale range (±volts).
///
/// Codes `0b101`, `0b110` and `0b111` all select the ±0.256 V range. They are
/// kept as separate variants so that a configuration survives a round trip
/// through the register unchanged.
#[allow(non_camel_case_types)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    /// ±6.144 V.
    V6_144,
    /// ±4.096 V.
    V4_096,
    /// ±2.048 V (power-on default).
    #[default]
    V2_048,
    /// ±1.024 V.
    V1_024,
    /// ±0.512 V.
    V0_512,
    /// ±0.256 V.
    V0_256,
    /// ±0.256 V, selected by code `0b110`.
    V0_256Alias6,
    /// ±0.256 V, selected by code `0b111`.
    V0_256Alias7,
}

impl Gain {
    /// Full-scale range in volts; readings span `-range..range`.
    pub fn full_scale_range(self) -> f64 {
        match self {
            Gain::V6_144 => 6.144,
            Gain::V4_096 => 4.096,
            Gain::V2_048 => 2.048,
            Gain::V1_024 => 1.024,
            Gain::V0_512 => 0.512,
            Gain::V0_256 | Gain::V0_256Alias6 | Gain::V0_256Alias7 => 0.256,
        }
    }

    /// Voltage represented by one least significant bit of a 16-bit reading.
    ///
    /// This is the full span (twice the full-scale range) divided by 2^16, so
    /// 62.5 µV for the default ±2.048 V range.
    pub fn lsb_size(self) -> f64 {
        self.full_scale_range() * 2.0 / 65_536.0
    }
}

#[doc(hidden)]
impl From<u8> for Gain {
    fn from(value: u8) -> Self {
        assert!(value <= 0b111, "Invalid bit pattern for gain.");
        match value {
            0b000 => Self::V6_144,
            0b001 => Self::V4_096,
            0b010 => Self::V2_048,
            0b011 => Self::V1_024,
            0b100 => Self::V0_512,
            0b101 => Self::V0_256,
            0b110 => Self::V0_256Alias6,
            0b111 => Self::V0_256Alias7,
            _ => unreachable!("Precondition assert covers > 7."),
        }
    }
}

#[doc(hidden)]
impl From<Gain> for u8 {
    fn from(value: Gain) -> Self {
        value as u8
    }
}

/// Conversion rate in samples per second.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DataRate {
    /// 8 SPS.
    Sps8,
    /// 16 SPS.
    Sps16,
    /// 32 SPS.
    Sps32,
    /// 64 SPS.
    Sps64,
    /// 128 SPS (power-on default).
    #[default]
    Sps128,
    /// 250 SPS.
    Sps250,
    /// 475 SPS.
    Sps475,
    /// 860 SPS.
    Sps860,
}

impl DataRate {
    /// Samples per second at this rate.
    pub fn samples_per_second(self) -> u32 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps860 => 860,
        }
    }

    /// Time taken by a single conversion at this rate.
    ///
    /// This does not include the time spent clocking the command in and the
    /// result out, so the real time to a result is always slightly longer.
    pub fn conversion_interval(self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.samples_per_second()))
    }
}

#[doc(hidden)]
impl From<u8> for DataRate {
    fn from(value: u8) -> Self {
        assert!(value <= 0b111, "Invalid bit pattern for data rate.");
        match value {
            0b000 => Self::Sps8,
            0b001 => Self::Sps16,
            0b010 => Self::Sps32,
            0b011 => Self::Sps64,
            0b100 => Self::Sps128,
            0b101 => Self::Sps250,
            0b110 => Self::Sps475,
            0b111 => Self::Sps860,
            _ => unreachable!("Precondition assert covers > 7."),
        }
    }
}

#[doc(hidden)]
impl From<DataRate> for u8 {
    fn from(value: DataRate) -> Self {
        value as u8
    }
}

/// Contents of the ADS1118 configuration register.
///
/// Build one with [`AdcConfig::new`] (or [`Default`]) and the `with_*` methods:
///
/// ```rust
/// # use ads1118_hal::config::{AdcConfig, DataRate, Gain, Multiplexer};
/// let config = AdcConfig::new()
///     .with_single_shot(true)
///     .with_multiplexer(Multiplexer::Ain2Ain3)
///     .with_gain(Gain::V0_256)
///     .with_data_rate(DataRate::Sps860);
/// assert_eq!(AdcConfig::decode(&config.encode()), config);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcConfig {
    /// Start a single conversion when the device is powered down.
    pub single_shot: bool,
    /// Which inputs are measured.
    pub multiplexer: Multiplexer,
    /// Full-scale range of the amplifier.
    pub gain: Gain,
    /// Power down after each conversion (single-shot mode) instead of converting
    /// continuously.
    pub single_shot_mode: bool,
    /// Conversion rate.
    pub data_rate: DataRate,
    /// Read the internal temperature sensor instead of the inputs.
    pub temp_sensor: bool,
    /// Enable the pull-up resistor on DOUT.
    pub pullup: bool,
    /// Write the configuration. When false the device ignores the word.
    pub operation: bool,
}

impl AdcConfig {
    /// Single-shot read of the internal temperature sensor at 250 SPS.
    ///
    /// The driver also sends this as a dummy command to flush the last result
    /// of a batch out of the device.
    pub const INTERNAL_TEMPERATURE: AdcConfig = AdcConfig::new()
        .with_single_shot(true)
        .with_temp_sensor(true)
        .with_data_rate(DataRate::Sps250);

    /// Power-on default configuration, with the pull-up enabled.
    pub const fn new() -> Self {
        Self {
            single_shot: false,
            multiplexer: Multiplexer::Ain0Ain1,
            gain: Gain::V2_048,
            single_shot_mode: true,
            data_rate: DataRate::Sps128,
            temp_sensor: false,
            pullup: true,
            operation: true,
        }
    }

    /// Set whether a single conversion is started.
    pub const fn with_single_shot(self, single_shot: bool) -> Self {
        Self { single_shot, ..self }
    }

    /// Set the input multiplexer.
    pub const fn with_multiplexer(self, multiplexer: Multiplexer) -> Self {
        Self { multiplexer, ..self }
    }

    /// Set the amplifier's full-scale range.
    pub const fn with_gain(self, gain: Gain) -> Self {
        Self { gain, ..self }
    }

    /// Set single-shot (power-down) mode.
    pub const fn with_single_shot_mode(self, single_shot_mode: bool) -> Self {
        Self {
            single_shot_mode,
            ..self
        }
    }

    /// Set the data rate.
    pub const fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Set whether the internal temperature sensor is read.
    pub const fn with_temp_sensor(self, temp_sensor: bool) -> Self {
        Self {
            temp_sensor,
            ..self
        }
    }

    /// Set whether the DOUT pull-up is enabled.
    pub const fn with_pullup(self, pullup: bool) -> Self {
        Self { pullup, ..self }
    }

    /// Set whether the device should accept this configuration.
    pub const fn with_operation(self, operation: bool) -> Self {
        Self { operation, ..self }
    }

    /// Lay the configuration out as a protocol word.
    ///
    /// From the most significant bit: single-shot (1), multiplexer (3), gain (3),
    /// mode (1), data rate (3), temperature sensor (1), pull-up (1), reserved 0 (1),
    /// operation (1), reserved 1 (1).
    pub fn encode(&self) -> Word {
        word_from_u16(u16::from(*self))
    }

    /// Read a configuration out of a protocol word. Reserved bits are ignored.
    pub fn decode(word: &Word) -> Self {
        Self::from(word_to_u16(word))
    }

    /// The configuration as two bytes, most significant first.
    pub fn to_be_bytes(&self) -> [u8; 2] {
        u16::from(*self).to_be_bytes()
    }

    /// Read a configuration from two bytes, most significant first.
    pub fn from_be_bytes(bytes: [u8; 2]) -> Self {
        Self::from(u16::from_be_bytes(bytes))
    }
}

impl Default for AdcConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<AdcConfig> for u16 {
    fn from(config: AdcConfig) -> Self {
        let mut word = 0u16;
        word.set_bit(15, config.single_shot);
        word.set_bits(12..=14, u8::from(config.multiplexer).into());
        word.set_bits(9..=11, u8::from(config.gain).into());
        word.set_bit(8, config.single_shot_mode);
        word.set_bits(5..=7, u8::from(config.data_rate).into());
        word.set_bit(4, config.temp_sensor);
        word.set_bit(3, config.pullup);
        word.set_bit(2, false); // Reserved, must be written as 0.
        word.set_bit(1, config.operation);
        word.set_bit(0, true); // Reserved, must be written as 1.
        word
    }
}

impl From<u16> for AdcConfig {
    fn from(word: u16) -> Self {
        // get_bits on a u16 returns a u16 holding at most 3 bits here.
        Self {
            single_shot: word.get_bit(15),
            multiplexer: Multiplexer::from(word.get_bits(12..=14) as u8),
            gain: Gain::from(word.get_bits(9..=11) as u8),
            single_shot_mode: word.get_bit(8),
            data_rate: DataRate::from(word.get_bits(5..=7) as u8),
            temp_sensor: word.get_bit(4),
            pullup: word.get_bit(3),
            operation: word.get_bit(1),
        }
    }
}

impl TryFrom<&[bool]> for AdcConfig {
    type Error = Error;

    /// Decode a configuration from a bit sequence that must be exactly 16 bits long.
    fn try_from(bits: &[bool]) -> Result<Self, Self::Error> {
        let word: &Word = bits.try_into().map_err(|_| Error::InvalidBitWidth {
            expected: 16,
            found: bits.len(),
        })?;
        Ok(Self::decode(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_power_on_register() {
        assert_eq!(u16::from(AdcConfig::default()), 0x058B);
        assert_eq!(AdcConfig::from(0x058B), AdcConfig::default());
    }

    #[test]
    fn internal_temperature_word() {
        assert_eq!(u16::from(AdcConfig::INTERNAL_TEMPERATURE), 0x85BB);
        assert_eq!(AdcConfig::INTERNAL_TEMPERATURE.to_be_bytes(), [0x85, 0xBB]);
    }

    #[test]
    fn every_field_round_trips() {
        for code in 0..=7u8 {
            let config = AdcConfig::new()
                .with_multiplexer(code.into())
                .with_gain((7 - code).into())
                .with_data_rate(code.into())
                .with_single_shot(code % 2 == 0)
                .with_single_shot_mode(code % 3 == 0)
                .with_temp_sensor(code < 4)
                .with_pullup(code % 2 == 1)
                .with_operation(code != 5);
            assert_eq!(AdcConfig::decode(&config.encode()), config);
            assert_eq!(AdcConfig::from_be_bytes(config.to_be_bytes()), config);
        }
    }

    #[test]
    fn reserved_bits_are_fixed() {
        let word = AdcConfig::new().with_operation(false).encode();
        assert!(!word[13]);
        assert!(word[15]);
    }

    #[test]
    fn high_gain_codes_alias() {
        let lsb = Gain::from(5u8).lsb_size();
        assert_eq!(Gain::from(6u8).lsb_size(), lsb);
        assert_eq!(Gain::from(7u8).lsb_size(), lsb);
        assert_eq!(Gain::from(6u8), Gain::V0_256Alias6);
        assert_eq!(u8::from(Gain::V0_256Alias7), 7);
        assert!((lsb - 7.8125e-6).abs() < 1e-12);
        assert!((Gain::V2_048.lsb_size() - 62.5e-6).abs() < 1e-12);
    }

    #[test]
    fn conversion_intervals() {
        assert_eq!(DataRate::Sps8.conversion_interval(), Duration::from_millis(125));
        assert_eq!(DataRate::Sps128.conversion_interval(), Duration::from_nanos(7_812_500));
        let fastest = DataRate::Sps860.conversion_interval();
        assert!(fastest > Duration::from_micros(1_160) && fastest < Duration::from_micros(1_165));
    }

    #[test]
    fn slice_width_is_checked() {
        let bits = [true; 15];
        assert_eq!(
            AdcConfig::try_from(&bits[..]),
            Err(Error::InvalidBitWidth {
                expected: 16,
                found: 15
            })
        );
        let word = AdcConfig::INTERNAL_TEMPERATURE.encode();
        assert_eq!(
            AdcConfig::try_from(&word[..]),
            Ok(AdcConfig::INTERNAL_TEMPERATURE)
        );
    }

    #[test]
    #[should_panic]
    fn gain_code_out_of_range() {
        let _ = Gain::from(8u8);
    }
}
