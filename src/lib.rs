#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod pwm;
pub mod support;

mod bus;
mod command;
mod driver;
mod error;
mod perf;

pub use bus::{BusTransport, I2cBus};
pub use command::{PulseCommand, PulseCommandSource};
pub use driver::{ChipTiming, Command, Mode, Pca9685, Status};
pub use error::Error;
pub use perf::{Perf, PerfCounters, COMMS_ERRORS};
