mod timer_interface;
pub use timer_interface::{Scheduler, TimerScheduler};

#[cfg(test)]
pub(crate) mod mock;
