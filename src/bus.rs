use embedded_hal::blocking::i2c::{Read, Write, WriteRead};

/// Raw byte transfer primitive of the bus the chip sits on.
///
/// An empty `write` skips the address phase and an empty `read` skips the
/// data phase, so a register read can be issued as two separate calls.
pub trait BusTransport {
    type Error: core::fmt::Debug;

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), Self::Error>;
}

/// [`BusTransport`] over a blocking embedded-hal I2C peripheral bound to one
/// device address.
pub struct I2cBus<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cBus<I2C> {
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> BusTransport for I2cBus<I2C>
where
    I2C: Write<Error = E> + Read<Error = E> + WriteRead<Error = E>,
    E: core::fmt::Debug,
{
    type Error = E;

    fn transfer(&mut self, write: &[u8], read: &mut [u8]) -> Result<(), E> {
        match (write.is_empty(), read.is_empty()) {
            (true, true) => Ok(()),
            (false, true) => self.i2c.write(self.address, write),
            (true, false) => self.i2c.read(self.address, read),
            (false, false) => self.i2c.write_read(self.address, write, read),
        }
    }
}
