//! PCA9685 register map

pub const MODE1: u8 = 0x00;
pub const PRE_SCALE: u8 = 0xFE;
pub const LED0_ON_L: u8 = 0x06;

/// Bytes per LED register block: ON_L, ON_H, OFF_L, OFF_H
pub const LED_BLOCK_LEN: u8 = 4;

pub mod mode1 {
    pub const RESTART: u8 = 0x80;
    pub const AI: u8 = 0x20;
    pub const SLEEP: u8 = 0x10;
    pub const ALLCALL: u8 = 0x01;
}

pub const fn led_on_l(channel: u8) -> u8 {
    LED0_ON_L + LED_BLOCK_LEN * channel
}
