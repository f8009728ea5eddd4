use byte::{BytesExt, LE};

use super::pca9685_bus::Pca9685Bus;
use super::registers;
use super::PinTicks;
use crate::bus::BusTransport;
use crate::config::CHANNEL_COUNT;
use crate::perf::Perf;
use crate::Error;

impl<B, P> Pca9685Bus<B, P>
where
    B: BusTransport,
    P: Perf,
{
    /// Writes the LED register block of `channel` in a single auto-increment
    /// transaction.
    pub fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<B::Error>> {
        if channel as usize >= CHANNEL_COUNT {
            return Err(Error::InvalidChannel(channel));
        }

        let mut frame = [0u8; 1 + registers::LED_BLOCK_LEN as usize];
        frame[0] = registers::led_on_l(channel);
        // both tick words always fit behind the register byte
        let offset = &mut 1;
        for ticks in [on, off] {
            let _ = frame[..].write_with::<u16>(offset, ticks, LE);
        }

        self.write_frame(&frame)
    }

    /// Sets a channel duty without caring about tick placement.
    /// `value` above 4095 is clamped, 0 and 4095 use the full off/on flags.
    pub fn set_pin(&mut self, channel: u8, value: u16) -> Result<(), Error<B::Error>> {
        let ticks = PinTicks::from_value(value);
        self.set_pwm(channel, ticks.on, ticks.off)
    }
}
