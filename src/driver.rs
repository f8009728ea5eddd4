use core::fmt;

use embedded_hal::blocking::delay::DelayMs;
use fugit_timer::{ExtU32, MicrosDurationU32};
use log::{debug, info};

use crate::bus::BusTransport;
use crate::command::{PulseCommand, PulseCommandSource};
use crate::config::{
    CHANNEL_COUNT, COMMAND_UPDATE_INTERVAL_MS, DEFAULT_PWM_PERIOD_US, PWM_TICKS, TEST_SWEEP_STEP,
};
use crate::perf::{Perf, COMMS_ERRORS};
use crate::pwm::{duty_ticks, period_in_range, period_to_freq, Pca9685Bus};
use crate::support::Scheduler;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Follow the pulse commands
    Normal,
    /// Ramp all channels over the full range
    TestSweep,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => f.write_str("normal"),
            Mode::TestSweep => f.write_str("test"),
        }
    }
}

/// Control commands besides start/stop, which belong to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Full chip setup, arms the tick on success
    Init,
    Reset,
    Test,
}

/// Carrier timing the duty values are computed against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChipTiming {
    pub period_us: u16,
    pub freq_hz: f32,
    pub interval: MicrosDurationU32,
}

impl ChipTiming {
    pub fn from_period(period_us: u16) -> Self {
        Self {
            period_us,
            freq_hz: period_to_freq(period_us),
            interval: (period_us as u32).micros(),
        }
    }
}

impl Default for ChipTiming {
    fn default() -> Self {
        Self::from_period(DEFAULT_PWM_PERIOD_US)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Status {
    pub mode: Mode,
    pub timing: ChipTiming,
    pub comms_errors: u32,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Mode: {}, period: {} us, freq: {:.2} Hz, {}: {}",
            self.mode, self.timing.period_us, self.timing.freq_hz, COMMS_ERRORS, self.comms_errors
        )
    }
}

/// PCA9685 output driver.
///
/// `run` is the scheduler tick; it re-arms itself through `S` after every
/// call. All entry points take `&mut self`, so a tick and a control command
/// can never interleave.
pub struct Pca9685<B, S, C, P, D> {
    regs: Pca9685Bus<B, P>,
    scheduler: S,
    commands: C,
    delay: D,

    mode: Mode,
    timing: ChipTiming,
    current_values: [u16; CHANNEL_COUNT],
    pulse_cmd: PulseCommand,
    test_pwm: u16,
    subscribed: bool,
}

impl<B, S, C, P, D> Pca9685<B, S, C, P, D>
where
    B: BusTransport,
    S: Scheduler,
    C: PulseCommandSource,
    P: Perf,
    D: DelayMs<u8>,
{
    pub fn new(bus: B, scheduler: S, commands: C, perf: P, delay: D) -> Self {
        Self {
            regs: Pca9685Bus::new(bus, perf),
            scheduler,
            commands,
            delay,

            mode: Mode::Normal,
            timing: ChipTiming::default(),
            current_values: [0; CHANNEL_COUNT],
            pulse_cmd: PulseCommand::default(),
            test_pwm: 0,
            subscribed: false,
        }
    }

    /// Resets the chip, programs the default carrier and schedules the first
    /// tick. Nothing is scheduled on failure.
    pub fn init(&mut self) -> Result<(), Error<B::Error>> {
        self.regs.reset()?;
        self.configure_frequency(self.timing.freq_hz)?;

        info!("pca9685 ready, {} Hz", self.timing.freq_hz);
        self.scheduler.schedule_now();
        Ok(())
    }

    pub fn configure_frequency(&mut self, freq_hz: f32) -> Result<(), Error<B::Error>> {
        self.regs.configure_frequency(freq_hz, &mut self.delay)
    }

    pub fn reset(&mut self) -> Result<(), Error<B::Error>> {
        self.regs.reset()
    }

    pub fn set_pin(&mut self, channel: u8, value: u16) -> Result<(), Error<B::Error>> {
        self.regs.set_pin(channel, value)
    }

    pub fn set_pwm(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Error<B::Error>> {
        self.regs.set_pwm(channel, on, off)
    }

    pub fn command(&mut self, cmd: Command) -> Result<(), Error<B::Error>> {
        match cmd {
            Command::Init => self.init(),
            Command::Reset => self.reset(),
            Command::Test => {
                info!("entering test mode");
                self.mode = Mode::TestSweep;
                Ok(())
            }
        }
    }

    pub fn status(&self) -> Status {
        Status {
            mode: self.mode,
            timing: self.timing,
            comms_errors: self.regs.perf().count(COMMS_ERRORS),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timing(&self) -> ChipTiming {
        self.timing
    }

    pub fn current_values(&self) -> &[u16; CHANNEL_COUNT] {
        &self.current_values
    }

    /// One scheduler tick.
    pub fn run(&mut self) {
        match self.mode {
            Mode::TestSweep => self.sweep(),
            Mode::Normal => self.update_outputs(),
        }

        self.scheduler.schedule_after(self.timing.interval);
    }

    fn sweep(&mut self) {
        if self.test_pwm > PWM_TICKS {
            self.test_pwm = 0;
        }

        for ch in 0..CHANNEL_COUNT as u8 {
            let _ = self.regs.set_pin(ch, self.test_pwm);
        }

        self.test_pwm += TEST_SWEEP_STEP;
    }

    fn update_outputs(&mut self) {
        if !self.subscribed {
            self.commands.subscribe(COMMAND_UPDATE_INTERVAL_MS.millis());
            self.subscribed = true;
        }

        let Some(cmd) = self.commands.poll() else {
            return;
        };
        self.pulse_cmd = cmd;

        self.update_timing(self.pulse_cmd.pwm_period_us);

        for (ch, &pulse_width) in self.pulse_cmd.pulse_width.iter().enumerate() {
            let new_value = duty_ticks(self.timing.period_us, pulse_width);
            debug!(
                "{}: current: {}, new: {}, pulse width: {}",
                ch, self.current_values[ch], new_value, pulse_width
            );

            if new_value >= PWM_TICKS {
                debug!("pwm value {} of channel {} is out of range", new_value, ch);
                continue;
            }

            if new_value != self.current_values[ch] {
                // failures are counted by the register layer
                let _ = self.regs.set_pin(ch as u8, new_value);
                self.current_values[ch] = new_value;
            }
        }
    }

    fn update_timing(&mut self, period_us: u16) {
        if period_us == self.timing.period_us {
            return;
        }

        if period_in_range(period_us) {
            self.timing = ChipTiming::from_period(period_us);
            debug!(
                "freq: {:.2}, period: {}",
                self.timing.freq_hz, self.timing.period_us
            );
        } else {
            debug!("pwm period {} us is out of range, ignored", period_us);
        }
    }
}
