use crate::config::{MAX_PWM_VAL, PWM_TICKS};

/// On/off tick pair of one LED register block.
///
/// Bit 12 of either half is the chip's "full on"/"full off" flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinTicks {
    pub on: u16,
    pub off: u16,
}

impl PinTicks {
    pub const FULL_ON: Self = Self {
        on: PWM_TICKS,
        off: 0,
    };

    pub const FULL_OFF: Self = Self {
        on: 0,
        off: PWM_TICKS,
    };

    /// Duty value to tick placement, values above [`MAX_PWM_VAL`] are clamped.
    pub fn from_value(value: u16) -> Self {
        match num::clamp(value, 0, MAX_PWM_VAL) {
            MAX_PWM_VAL => Self::FULL_ON,
            0 => Self::FULL_OFF,
            v => Self { on: 0, off: v },
        }
    }
}
