/// Wrapper for problems when talking to the ADS1118 or converting its readings.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Error {
    /// The configuration echoed by the ADS1118 was not the configuration written to it.
    ///
    /// The enclosed count is the number of set bits in the echoed word. Zero usually
    /// means there is no device on the bus (or it is unpowered). A non-zero count
    /// suggests that something else is also driving the bus, or that the lines are
    /// noisy.
    #[error("echoed configuration does not match command (sum of bits: {set_bits})")]
    ConnectionFault {
        /// Population count of the echoed configuration word.
        set_bits: u32,
    },
    /// A temperature or voltage falls outside the calibrated type K range.
    ///
    /// The range is half-open: `min` is accepted, `max` is not.
    #[error("{value} out of range, expected a value in [{min}, {max})")]
    OutOfRange {
        /// The rejected input.
        value: f64,
        /// Lowest accepted value.
        min: f64,
        /// First rejected value above the range.
        max: f64,
    },
    /// A bit sequence had the wrong length to be used as a protocol word.
    #[error("expected {expected} bits, found {found}")]
    InvalidBitWidth {
        /// Required number of bits.
        expected: usize,
        /// Length of the rejected sequence.
        found: usize,
    },
    /// A pin driver reported an error while setting or reading a line.
    #[error("pin error: {0:?}")]
    Pin(embedded_hal::digital::ErrorKind),
}

/// Map any embedded-hal pin error to [`Error::Pin`].
pub(crate) fn pin_error<E: embedded_hal::digital::Error>(error: E) -> Error {
    Error::Pin(error.kind())
}
