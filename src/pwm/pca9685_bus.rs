use log::error;

use crate::bus::BusTransport;
use crate::perf::{Perf, COMMS_ERRORS};
use crate::Error;

/// Register level access to the PCA9685.
///
/// Every failed transaction bumps the `com_err` counter and is logged here,
/// callers only see the propagated error.
pub struct Pca9685Bus<B, P> {
    pub(crate) bus: B,
    pub(crate) perf: P,
}

impl<B, P> Pca9685Bus<B, P>
where
    B: BusTransport,
    P: Perf,
{
    pub fn new(bus: B, perf: P) -> Self {
        Self { bus, perf }
    }

    pub fn perf(&self) -> &P {
        &self.perf
    }

    pub fn release(self) -> (B, P) {
        (self.bus, self.perf)
    }

    pub(crate) fn write_frame(&mut self, frame: &[u8]) -> Result<(), Error<B::Error>> {
        self.bus
            .transfer(frame, &mut [])
            .map_err(|e| self.comms_error(e))
    }

    /// Register read as two transactions: address phase, then data phase.
    pub fn read8(&mut self, reg: u8) -> Result<u8, Error<B::Error>> {
        let mut value = [0u8; 1];
        self.bus
            .transfer(&[reg], &mut [])
            .and_then(|_| self.bus.transfer(&[], &mut value))
            .map_err(|e| self.comms_error(e))?;
        Ok(value[0])
    }

    pub fn write8(&mut self, reg: u8, value: u8) -> Result<(), Error<B::Error>> {
        self.write_frame(&[reg, value])
    }

    fn comms_error(&mut self, e: B::Error) -> Error<B::Error> {
        self.perf.increment(COMMS_ERRORS);
        error!("i2c transfer failed: {:?}", e);
        Error::Bus(e)
    }
}
