use fugit_timer::MillisDurationU32;
use heapless::spsc::Consumer;

use crate::config::{CHANNEL_COUNT, DEFAULT_PWM_PERIOD_US};

/// Pulse widths requested by the flight stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseCommand {
    pub pwm_period_us: u16,
    pub pulse_width: [u16; CHANNEL_COUNT],
}

impl Default for PulseCommand {
    fn default() -> Self {
        Self {
            pwm_period_us: DEFAULT_PWM_PERIOD_US,
            pulse_width: [0; CHANNEL_COUNT],
        }
    }
}

/// Polled channel delivering new [`PulseCommand`]s.
pub trait PulseCommandSource {
    /// Called once, before the first poll
    fn subscribe(&mut self, interval: MillisDurationU32);

    /// Latest command published since the previous poll, if any
    fn poll(&mut self) -> Option<PulseCommand>;
}

/// Drains the queue and keeps only the newest command.
///
/// The update interval is not enforced, the producer side paces itself.
impl<'a, const N: usize> PulseCommandSource for Consumer<'a, PulseCommand, N> {
    fn subscribe(&mut self, _interval: MillisDurationU32) {}

    fn poll(&mut self) -> Option<PulseCommand> {
        let mut latest = None;
        while let Some(cmd) = self.dequeue() {
            latest = Some(cmd);
        }
        latest
    }
}
