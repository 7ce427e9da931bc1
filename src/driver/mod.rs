use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};
use tracing::{debug, trace, warn};

use bit_field::BitField;

use crate::bits::{Word, count_ones, word_to_u16};
use crate::config::AdcConfig;
use crate::conversion::{Measurement, interpret};
use crate::error::{Error, pin_error};

mod wait;

pub use wait::ReadyWait;

/// How long SCLK is held low to reset the serial interface.
///
/// The datasheet asks for 28 ms (section 9.5.3); this leaves some margin.
const RESET_HOLD_MS: u32 = 30;

/// Result of one 32-bit transfer cycle.
///
/// The frame carries the data word first and the echoed configuration second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawExchange {
    /// Conversion result of the command sent in the _previous_ cycle.
    pub data: Word,
    /// The command sent in this cycle, as echoed by the ADS1118.
    pub echoed_config: Word,
}

/// Stand-in chip select for an ADS1118 whose CS line is tied low.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChipSelect;

impl ErrorType for NoChipSelect {
    type Error = core::convert::Infallible;
}

impl OutputPin for NoChipSelect {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Driver for the ADS1118, bit-banged over four GPIO lines.
///
/// # Quick start
///
/// Hand over the pins connected to SCLK, DIN and DOUT (and CS, if it is not tied
/// low), a delay provider, and the [`ReadyWait`] strategy. The DOUT input should
/// be configured with a pull-down resistor by your HAL before it is passed in.
///
/// ```rust,ignore
/// let mut adc = ADS1118::new(sclk, din, dout, delay, ReadyWait::Timed)?;
/// let thermocouple = AdcConfig::new()
///     .with_single_shot(true)
///     .with_gain(Gain::V0_256);
/// let readings = adc.read_batch(&[AdcConfig::INTERNAL_TEMPERATURE, thermocouple])?;
/// ```
///
/// # Pipelining
///
/// The ADS1118 clocks out the result of the _previous_ command while the next
/// command is clocked in. [`ADS1118::read_batch`] hides this by sending a dummy
/// internal temperature command after the last real one and pairing each command
/// with the data from the following cycle.
///
/// <div class="warning">
///
/// The driver assumes the device has powered down between calls to
/// [`ADS1118::read_batch`] (about 7 ms with the default configuration). Reading
/// again sooner gives wrong results without any error being reported.
///
/// </div>
///
/// # Supply voltage
///
/// Although the datasheet allows a 5 V supply, the DOUT level is then too high for
/// a 3.3 V host like the Raspberry Pi. Power the ADS1118 from 3.3 V, or divide
/// down DOUT.
#[derive(Debug)]
pub struct ADS1118<SCLK, DIN, DOUT, CS, D> {
    sclk: SCLK,
    din: DIN,
    dout: DOUT,
    cs: CS,
    delay: D,
    wait: ReadyWait,
}

impl<SCLK, DIN, DOUT, D> ADS1118<SCLK, DIN, DOUT, NoChipSelect, D>
where
    SCLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    D: DelayNs,
{
    /// Reset the ADS1118 and create the driver, for a device with CS tied low.
    ///
    /// # Errors
    ///
    /// Any pin error, or [`Error::ConnectionFault`] if the device does not echo the
    /// initial flush command.
    pub fn new(sclk: SCLK, din: DIN, dout: DOUT, delay: D, wait: ReadyWait) -> Result<Self, Error> {
        Self::new_with_chip_select(sclk, din, dout, NoChipSelect, delay, wait)
    }
}

impl<SCLK, DIN, DOUT, CS, D> ADS1118<SCLK, DIN, DOUT, CS, D>
where
    SCLK: OutputPin,
    DIN: OutputPin,
    DOUT: InputPin,
    CS: OutputPin,
    D: DelayNs,
{
    /// Reset the ADS1118 and create the driver, using a chip select pin.
    ///
    /// SCLK is held low for 30 ms to reset the serial interface, then an internal
    /// temperature command is exchanged and checked so the device's pipeline is
    /// in a known state before any of your commands are sent.
    ///
    /// # Errors
    ///
    /// Any pin error, or [`Error::ConnectionFault`] if the device does not echo the
    /// initial flush command.
    pub fn new_with_chip_select(
        sclk: SCLK,
        din: DIN,
        dout: DOUT,
        cs: CS,
        delay: D,
        wait: ReadyWait,
    ) -> Result<Self, Error> {
        let mut device = Self {
            sclk,
            din,
            dout,
            cs,
            delay,
            wait,
        };
        device.reset()?;
        Ok(device)
    }

    /// Hand back the pins and delay provider.
    pub fn destroy(self) -> (SCLK, DIN, DOUT, CS, D) {
        (self.sclk, self.din, self.dout, self.cs, self.delay)
    }

    /// The waiting strategy chosen at construction.
    pub fn ready_wait(&self) -> ReadyWait {
        self.wait
    }

    fn reset(&mut self) -> Result<(), Error> {
        self.cs.set_high().map_err(pin_error)?;
        self.sclk.set_low().map_err(pin_error)?;
        self.din.set_low().map_err(pin_error)?;

        debug!("holding SCLK low for {RESET_HOLD_MS} ms to reset the ADS1118");
        self.delay.delay_ms(RESET_HOLD_MS);

        let flush = AdcConfig::INTERNAL_TEMPERATURE;
        self.send(&flush)?;
        // Polling DOUT straight after reset can hang, so always sleep here.
        ReadyWait::Timed.wait(&mut self.cs, &mut self.dout, &mut self.delay, flush.data_rate)?;
        debug!("ADS1118 ready");
        Ok(())
    }

    /// Perform one 32-bit transfer cycle.
    ///
    /// The command is clocked out twice. For each bit SCLK is raised, DIN is set,
    /// DOUT is sampled, and SCLK is lowered. The ADS1118 shifts out the previous
    /// conversion result in the first 16 bits and echoes the command in the last
    /// 16. The cycle always runs to completion once started, as stopping part-way
    /// leaves the device's shift register misaligned.
    ///
    /// This is the raw protocol step; prefer [`ADS1118::read_batch`].
    pub fn exchange(&mut self, command: &Word) -> Result<RawExchange, Error> {
        let mut data = [false; 16];
        let mut echoed_config = [false; 16];

        self.cs.set_low().map_err(pin_error)?;
        for (slot, &bit) in command.iter().chain(command.iter()).enumerate() {
            self.sclk.set_high().map_err(pin_error)?;
            self.din.set_state(PinState::from(bit)).map_err(pin_error)?;
            let level = self.dout.is_high().map_err(pin_error)?;
            self.sclk.set_low().map_err(pin_error)?;

            if slot < 16 {
                data[slot] = level;
            } else {
                echoed_config[slot - 16] = level;
            }
        }
        self.cs.set_high().map_err(pin_error)?;

        trace!(
            "sent {:#06x}, received data {:#06x}, echo {:#06x}",
            word_to_u16(command),
            word_to_u16(&data),
            word_to_u16(&echoed_config)
        );
        Ok(RawExchange {
            data,
            echoed_config,
        })
    }

    /// Exchange a command, check its echo, and return the previous result.
    fn send(&mut self, command: &AdcConfig) -> Result<Word, Error> {
        let response = self.exchange(&command.encode())?;
        verify(command, &response.echoed_config)?;
        Ok(response.data)
    }

    /// Take a single-shot measurement for each command, in order.
    ///
    /// Each command is sent and then the driver waits (see [`ReadyWait`]) for the
    /// conversion. A final internal temperature command is sent to collect the
    /// last result. The data received with the first command belongs to whatever
    /// ran before this call and is discarded.
    ///
    /// An empty batch sends nothing, not even the flush, and returns no
    /// measurements.
    ///
    /// # Errors
    ///
    /// Every echo is checked as it arrives. The first mismatch aborts the batch
    /// with [`Error::ConnectionFault`] and no measurements are returned. It is not
    /// retried, as retrying won't help if another controller is driving the bus.
    pub fn read_batch(&mut self, commands: &[AdcConfig]) -> Result<Vec<Measurement>, Error> {
        let mut measurements = Vec::with_capacity(commands.len());
        let mut previous: Option<&AdcConfig> = None;

        for command in commands {
            let data = self.send(command)?;
            if let Some(previous) = previous {
                measurements.push(interpret(previous, &data));
            }
            self.wait
                .wait(&mut self.cs, &mut self.dout, &mut self.delay, command.data_rate)?;
            previous = Some(command);
        }

        if let Some(last) = previous {
            let data = self.send(&AdcConfig::INTERNAL_TEMPERATURE)?;
            measurements.push(interpret(last, &data));
        }
        Ok(measurements)
    }

    /// Take a single measurement. See [`ADS1118::read_batch`].
    pub fn read(&mut self, command: AdcConfig) -> Result<Measurement, Error> {
        let measurement = self
            .read_batch(&[command])?
            .pop()
            .expect("One measurement per command.");
        Ok(measurement)
    }
}

/// Check that the echoed configuration matches the command that was sent.
///
/// Every bit is compared except the single-shot trigger (which the device clears
/// once the conversion starts) and the final reserved bit.
///
/// # Errors
///
/// [`Error::ConnectionFault`] on a mismatch, carrying the number of set bits in
/// the echo. Zero suggests nothing is connected; anything else suggests another
/// controller is using the bus.
pub fn verify(command: &AdcConfig, echoed: &Word) -> Result<(), Error> {
    let difference = u16::from(*command) ^ word_to_u16(echoed);
    if difference.get_bits(1..=14) == 0 {
        return Ok(());
    }
    let set_bits = count_ones(echoed);
    warn!(
        "ADS1118 echoed {:#06x} for command {:#06x} (sum of bits: {set_bits})",
        word_to_u16(echoed),
        u16::from(*command)
    );
    Err(Error::ConnectionFault { set_bits })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DataRate, Gain};

    #[test]
    fn verify_ignores_single_shot() {
        let command = AdcConfig::new().with_single_shot(true);
        let echo = command.with_single_shot(false).encode();
        assert_eq!(verify(&command, &echo), Ok(()));
    }

    #[test]
    fn verify_reports_absent_device() {
        let command = AdcConfig::INTERNAL_TEMPERATURE;
        assert_eq!(
            verify(&command, &[false; 16]),
            Err(Error::ConnectionFault { set_bits: 0 })
        );
    }

    #[test]
    fn verify_reports_contention() {
        let command = AdcConfig::new().with_data_rate(DataRate::Sps860);
        let echo = command.with_gain(Gain::V6_144).encode();
        let expected = count_ones(&echo);
        assert_eq!(
            verify(&command, &echo),
            Err(Error::ConnectionFault { set_bits: expected })
        );
    }
}
