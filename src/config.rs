pub const MCU_XTAL_HZ: u32 = 8_000_000;

//-----------------------------------------------------------------------------

pub const SYSTICK_RATE_HZ: u32 = 10_000;

/// I2C bus clock for the PCA9685
pub const I2C_BUS_FREQ_HZ: u32 = 100_000;

//-----------------------------------------------------------------------------

/// Default 7-bit PCA9685 address (all address pins low)
pub const PCA9685_ADDR: u8 = 0x40;

/// Internal oscillator of the PCA9685
pub const PCA9685_OSC_HZ: f32 = 25_000_000.0;

/// Ticks in one PWM cycle
pub const PWM_TICKS: u16 = 1 << 12;

pub const CHANNEL_COUNT: usize = 16;

pub const MIN_PWM_FREQ: u32 = 24; // pca9685 min
pub const MAX_PWM_FREQ: u32 = 1526; // pca9685 max
pub const MAX_PWM_VAL: u16 = PWM_TICKS - 1;

pub const PWM_PERIOD_MIN_US: u16 = 656; // 1 / MAX_PWM_FREQ
pub const PWM_PERIOD_MAX_US: u16 = 41_666; // 1 / MIN_PWM_FREQ

pub const DEFAULT_PWM_PERIOD_US: u16 = 20_000;

/// Settling time after waking the oscillator
pub const OSC_SETTLE_MS: u8 = 5;

//-----------------------------------------------------------------------------

/// Minimal interval between two pulse command updates
pub const COMMAND_UPDATE_INTERVAL_MS: u32 = 10;

/// Ramp increment of the test sweep, 1/10 of the full range per tick
pub const TEST_SWEEP_STEP: u16 = PWM_TICKS / 10;

/// Pulse command queue depth in the firmware
pub const COMMAND_QUEUE_LEN: usize = 4;
