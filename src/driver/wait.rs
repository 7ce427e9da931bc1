use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::config::DataRate;
use crate::error::{Error, pin_error};

/// How the driver waits for a conversion to finish after sending a command.
///
/// When a conversion is complete the ADS1118 pulls DOUT low, which signals that
/// the result is ready to be clocked out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ReadyWait {
    /// Sleep for the nominal conversion time of the command's data rate.
    ///
    /// The time spent clocking data in and out is not accounted for, so this
    /// always waits slightly longer than necessary (around 0.25 ms on a
    /// Raspberry Pi), but leaves the thread free for other work.
    #[default]
    Timed,
    /// Spin reading DOUT until it goes low.
    ///
    /// DOUT is only driven while CS is low, so CS is held low for the poll.
    /// This collects the result as soon as it is ready, but keeps the calling
    /// thread busy the whole time.
    Polled,
}

impl ReadyWait {
    /// Block until a conversion at `data_rate` should be complete.
    ///
    /// `cs` is only touched when polling, and is left high.
    pub fn wait<CS, DOUT, D>(
        self,
        cs: &mut CS,
        dout: &mut DOUT,
        delay: &mut D,
        data_rate: DataRate,
    ) -> Result<(), Error>
    where
        CS: OutputPin,
        DOUT: InputPin,
        D: DelayNs,
    {
        match self {
            ReadyWait::Timed => {
                let interval = data_rate.conversion_interval().as_nanos();
                // The slowest rate is 125 ms, well within a u32 of nanoseconds.
                delay.delay_ns(u32::try_from(interval).unwrap_or(u32::MAX));
            }
            ReadyWait::Polled => {
                cs.set_low().map_err(pin_error)?;
                while dout.is_high().map_err(pin_error)? {}
                cs.set_high().map_err(pin_error)?;
            }
        }
        Ok(())
    }
}
