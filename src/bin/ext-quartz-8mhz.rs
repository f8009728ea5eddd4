#![no_main]
#![no_std]

use panic_abort as _;
use rtic::app;

use stm32f1xx_hal::afio::AfioExt;
use stm32f1xx_hal::flash::FlashExt;
use stm32f1xx_hal::gpio::{Alternate, GpioExt, OpenDrain, PB6, PB7};
use stm32f1xx_hal::i2c::{BlockingI2c, Mode};
use stm32f1xx_hal::pac::{I2C1, TIM3};
use stm32f1xx_hal::timer::Delay;

use fugit_timer::MicrosDurationU32;
use heapless::spsc::{Consumer, Producer, Queue};
use log::error;

use systick_monotonic::Systick;

use stm32f1_pca9685_out::config::{self, COMMAND_QUEUE_LEN, I2C_BUS_FREQ_HZ, PCA9685_ADDR};
use stm32f1_pca9685_out::support::Scheduler;
use stm32f1_pca9685_out::{Command, I2cBus, Pca9685, PerfCounters, PulseCommand};

//-----------------------------------------------------------------------------

type PwmI2c = BlockingI2c<I2C1, (PB6<Alternate<OpenDrain>>, PB7<Alternate<OpenDrain>>)>;

type Driver = Pca9685<
    I2cBus<PwmI2c>,
    RticScheduler,
    Consumer<'static, PulseCommand, COMMAND_QUEUE_LEN>,
    PerfCounters<1>,
    Delay<TIM3, 1_000_000>,
>;

/// Re-arms the `pwm_update` software task through the monotonic.
pub struct RticScheduler;

impl Scheduler for RticScheduler {
    fn schedule_now(&mut self) {
        let _ = app::pwm_update::spawn();
    }

    fn schedule_after(&mut self, delay: MicrosDurationU32) {
        use systick_monotonic::ExtU64;

        let _ = app::pwm_update::spawn_after((delay.ticks() as u64).micros().convert());
    }
}

//-----------------------------------------------------------------------------

#[app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [RTCALARM, TAMPER])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        driver: Driver,
    }

    #[local]
    struct Local {
        commands_tx: Producer<'static, PulseCommand, COMMAND_QUEUE_LEN>,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<{ config::SYSTICK_RATE_HZ }>;

    #[init(local = [queue: Queue<PulseCommand, COMMAND_QUEUE_LEN> = Queue::new()])]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        use stm32f1xx_hal::prelude::_fugit_RateExtU32;
        use stm32f1xx_hal::prelude::_stm32_hal_rcc_RccExt;
        use stm32f1xx_hal::prelude::_stm32f4xx_hal_timer_TimerExt;

        let mut flash = ctx.device.FLASH.constrain();

        let mut gpiob = ctx.device.GPIOB.split();
        let mut afio = ctx.device.AFIO.constrain();

        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(config::MCU_XTAL_HZ.Hz())
            .sysclk(32u32.MHz())
            .freeze(&mut flash.acr);

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());

        //---------------------------------------------------------------------

        let scl = gpiob.pb6.into_alternate_open_drain(&mut gpiob.crl);
        let sda = gpiob.pb7.into_alternate_open_drain(&mut gpiob.crl);

        let i2c = BlockingI2c::i2c1(
            ctx.device.I2C1,
            (scl, sda),
            &mut afio.mapr,
            Mode::Standard {
                frequency: I2C_BUS_FREQ_HZ.Hz(),
            },
            clocks,
            1000,
            10,
            1000,
            1000,
        );

        let delay = ctx.device.TIM3.delay_us(&clocks);

        let (commands_tx, commands_rx) = ctx.local.queue.split();

        let mut driver = Driver::new(
            I2cBus::new(i2c, PCA9685_ADDR),
            RticScheduler,
            commands_rx,
            PerfCounters::new(),
            delay,
        );

        // the tick stays unarmed until `control` gets `Command::Init`
        if let Err(e) = driver.init() {
            error!("pca9685 init failed: {}", e);
        }

        //---------------------------------------------------------------------

        (
            Shared { driver },
            Local { commands_tx },
            init::Monotonics(mono),
        )
    }

    //-------------------------------------------------------------------------

    #[idle()]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    //-------------------------------------------------------------------------

    #[task(shared = [driver])]
    fn pwm_update(mut ctx: pwm_update::Context) {
        ctx.shared.driver.lock(|driver| driver.run());
    }

    /// Entry point for the flight stack to publish new pulse widths
    #[task(local = [commands_tx], capacity = 4)]
    fn pulse_command(ctx: pulse_command::Context, cmd: PulseCommand) {
        let _ = ctx.local.commands_tx.enqueue(cmd);
    }

    #[task(shared = [driver], capacity = 2)]
    fn control(mut ctx: control::Context, cmd: Command) {
        ctx.shared.driver.lock(|driver| {
            if let Err(e) = driver.command(cmd) {
                error!("{:?} failed: {}", cmd, e);
            }
        });
    }
}
