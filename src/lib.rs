#![doc = include_str!("../README.md")]
#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod bits;
pub mod config;
pub mod conversion;
mod driver;
mod error;
pub mod thermocouple;

pub use config::AdcConfig;
pub use conversion::Measurement;
pub use driver::{ADS1118, NoChipSelect, RawExchange, ReadyWait, verify};
pub use error::Error;
