use embedded_hal::blocking::delay::DelayMs;
use log::{debug, warn};

use super::pca9685_bus::Pca9685Bus;
use super::pwm_calc::prescaler;
use super::registers::{mode1, MODE1, PRE_SCALE};
use crate::bus::BusTransport;
use crate::config::OSC_SETTLE_MS;
use crate::perf::Perf;
use crate::Error;

impl<B, P> Pca9685Bus<B, P>
where
    B: BusTransport,
    P: Perf,
{
    /// Programs the carrier frequency and enables register auto-increment.
    ///
    /// The prescaler is only writable while the oscillator sleeps. Any failure
    /// aborts the sequence and may leave the chip asleep, the whole sequence
    /// has to be repeated then.
    pub fn configure_frequency<D>(
        &mut self,
        freq_hz: f32,
        delay: &mut D,
    ) -> Result<(), Error<B::Error>>
    where
        D: DelayMs<u8>,
    {
        let prescale = prescaler(freq_hz);
        debug!("freq: {:.2} Hz, prescaler: {}", freq_hz, prescale);

        let old_mode = self.read8(MODE1)?;
        let sleep_mode = (old_mode & !mode1::RESTART) | mode1::SLEEP;

        self.write8(MODE1, sleep_mode)?;
        self.write8(PRE_SCALE, prescale)?;
        self.write8(MODE1, old_mode)?;

        delay.delay_ms(OSC_SETTLE_MS);

        self.write8(
            MODE1,
            old_mode | mode1::RESTART | mode1::AI | mode1::ALLCALL,
        )
    }

    /// Clears MODE1, the prescaler is left untouched.
    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        warn!("resetting");
        self.write8(MODE1, 0x00)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::perf::{PerfCounters, COMMS_ERRORS};
    use crate::support::mock::{MockBus, MockDelay, Transaction};

    fn regs(old_mode: u8) -> Pca9685Bus<MockBus, PerfCounters<1>> {
        let mut bus = MockBus::new();
        bus.push_read(&[old_mode]);
        Pca9685Bus::new(bus, PerfCounters::new())
    }

    #[test]
    fn sequence_order() {
        let mut regs = regs(0x01);
        let mut delay = MockDelay::default();

        regs.configure_frequency(50.0, &mut delay).unwrap();

        assert_eq!(
            regs.bus.transactions(),
            vec![
                Transaction::Write(vec![0x00]),
                Transaction::Read(1),
                Transaction::Write(vec![0x00, 0x11]),
                Transaction::Write(vec![0xFE, 121]),
                Transaction::Write(vec![0x00, 0x01]),
                Transaction::Write(vec![0x00, 0xA1]),
            ]
        );
        assert_eq!(delay.delays_ms, vec![5]);
    }

    #[test]
    fn sleep_drops_restart_bit() {
        let mut regs = regs(0xA1);
        let mut delay = MockDelay::default();

        regs.configure_frequency(1526.0, &mut delay).unwrap();

        let writes = regs.bus.writes();
        assert_eq!(writes[1], vec![0x00, 0x31]);
        assert_eq!(writes[2], vec![0xFE, 3]);
        assert_eq!(writes[3], vec![0x00, 0xA1]);
        assert_eq!(writes[4], vec![0x00, 0xA1]);
    }

    #[test]
    fn every_valid_frequency_runs_full_sequence() {
        for freq in [24u32, 50, 60, 200, 400, 1000, 1526] {
            let mut regs = regs(0x00);
            let mut delay = MockDelay::default();

            regs.configure_frequency(freq as f32, &mut delay).unwrap();

            let writes = regs.bus.writes();
            let mode_writes: std::vec::Vec<u8> = writes
                .iter()
                .filter(|w| w.len() == 2 && w[0] == MODE1)
                .map(|w| w[1])
                .collect();
            assert_eq!(mode_writes, vec![0x10, 0x00, 0xA1]);
            assert_eq!(writes[2], vec![PRE_SCALE, prescaler(freq as f32)]);
        }
    }

    #[test]
    fn read_failure_aborts_before_any_write() {
        let mut regs = regs(0x00);
        regs.bus.fail_at(1);
        let mut delay = MockDelay::default();

        assert!(regs.configure_frequency(50.0, &mut delay).is_err());
        assert_eq!(regs.bus.transactions().len(), 2);
        assert!(delay.delays_ms.is_empty());
        assert_eq!(regs.perf().count(COMMS_ERRORS), 1);
    }

    #[test]
    fn prescaler_failure_leaves_chip_asleep() {
        let mut regs = regs(0x00);
        // address, data, sleep, prescaler
        regs.bus.fail_at(3);
        let mut delay = MockDelay::default();

        assert!(regs.configure_frequency(50.0, &mut delay).is_err());
        assert_eq!(regs.bus.writes().last(), Some(&vec![0xFE, 121]));
        assert_eq!(regs.bus.transactions().len(), 4);
        assert!(delay.delays_ms.is_empty());
    }

    #[test]
    fn reset_clears_mode1() {
        let mut regs = regs(0x00);
        regs.reset().unwrap();
        assert_eq!(regs.bus.writes(), vec![vec![0x00, 0x00]]);
    }
}
