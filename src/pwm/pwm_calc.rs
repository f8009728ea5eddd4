use crate::config::{PCA9685_OSC_HZ, PWM_PERIOD_MAX_US, PWM_PERIOD_MIN_US, PWM_TICKS};

/// PRE_SCALE register value for the requested carrier frequency
pub fn prescaler(freq_hz: f32) -> u8 {
    let prescale = libm::roundf(PCA9685_OSC_HZ / PWM_TICKS as f32 / freq_hz - 1.0);
    num::clamp(prescale, u8::MIN as f32, u8::MAX as f32) as u8
}

pub fn period_to_freq(period_us: u16) -> f32 {
    1_000_000.0 / period_us as f32
}

pub fn period_in_range(period_us: u16) -> bool {
    (PWM_PERIOD_MIN_US..=PWM_PERIOD_MAX_US).contains(&period_us)
}

/// Pulse width as a share of the 4096-tick cycle of `period_us`.
///
/// Saturates at `u16::MAX`, a zero pulse width therefore never produces a
/// writable value.
pub fn duty_ticks(period_us: u16, pulse_width_us: u16) -> u16 {
    libm::roundf(period_us as f32 / pulse_width_us as f32 * PWM_TICKS as f32) as u16
}
