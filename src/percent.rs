//! Percent helpers
//!
//! The mixer and the controller only ever reason in percent (0-100).
//! Conversion to raw duty values happens at the output boundary.

/// Upper bound of the percent domain
pub const PERCENT_MAX: u8 = 100;

/// Clamp an untrusted inbound integer to the percent domain
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn clamp_percent(value: i32) -> u8 {
    if value <= 0 {
        0
    } else if value >= PERCENT_MAX as i32 {
        PERCENT_MAX
    } else {
        value as u8
    }
}

/// Saturate an already unsigned value to the percent domain
#[inline]
pub const fn saturate_percent(value: u8) -> u8 {
    if value > PERCENT_MAX {
        PERCENT_MAX
    } else {
        value
    }
}

/// Scale `value` by `percent / 100`, rounding down
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn scale_percent(value: u8, percent: u8) -> u8 {
    ((value as u16 * saturate_percent(percent) as u16) / PERCENT_MAX as u16) as u8
}

/// Convert a percentage to a raw duty value for a timer with `max_duty` ticks
///
/// `duty = percent * max_duty / 100`
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
pub const fn percent_to_duty(percent: u8, max_duty: u16) -> u16 {
    ((saturate_percent(percent) as u32 * max_duty as u32) / PERCENT_MAX as u32) as u16
}
