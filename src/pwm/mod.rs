pub mod registers;

mod pwm_calc;
pub use pwm_calc::{duty_ticks, period_in_range, period_to_freq, prescaler};

mod pwm_channel;
pub use pwm_channel::PinTicks;

mod pca9685_bus;
pub use pca9685_bus::Pca9685Bus;

mod pca9685_channels;
mod pca9685_freq;
