use fugit_timer::{ExtU32, MicrosDurationU32};
use log::error;

/// One-shot re-arming of the driver's tick.
pub trait Scheduler {
    fn schedule_now(&mut self);
    fn schedule_after(&mut self, delay: MicrosDurationU32);
}

/// [`Scheduler`] over a hardware one-shot timer, the owner calls the driver's
/// tick from the timer interrupt.
pub struct TimerScheduler<TIM> {
    timer: TIM,
}

impl<TIM> TimerScheduler<TIM> {
    pub fn new(timer: TIM) -> Self {
        Self { timer }
    }

    pub fn timer(&mut self) -> &mut TIM {
        &mut self.timer
    }
}

impl<TIM> Scheduler for TimerScheduler<TIM>
where
    TIM: fugit_timer::Timer<1_000_000>,
    TIM::Error: core::fmt::Debug,
{
    fn schedule_now(&mut self) {
        self.schedule_after(1u32.micros());
    }

    fn schedule_after(&mut self, delay: MicrosDurationU32) {
        let _ = self.timer.cancel();
        if let Err(e) = self.timer.start(delay) {
            error!("failed to arm timer: {:?}", e);
        }
    }
}
