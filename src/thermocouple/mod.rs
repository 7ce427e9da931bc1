//! Type K thermocouple conversions.
//!
//! Two independent ways of finding the hot junction temperature are provided:
//!
//! - [`linearize`] adds the cold junction's equivalent voltage (from the NIST
//!   reference function) to the measured voltage and applies the NIST inverse
//!   polynomial. This is the one to use with a reading from the ADS1118.
//! - [`get_temperature`] does the same using only the 10 °C reference table and
//!   linear interpolation.
//!
//! With the ADS1118, the internal temperature sensor reads the cold junction and
//! a differential input at ±0.256 V reads the thermocouple.

mod compensation;
mod table;

pub use compensation::{cold_junction_millivolts, get_temperature, inverse_millivolts, linearize};
pub use table::{DEGREES_C, MILLIVOLTS, millivolts_to_temperature, temperature_to_millivolts};
