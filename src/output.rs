//! Hardware output port
//!
//! The controller talks to the PWM hardware only through [`DutyOutput`],
//! always in percent. Conversion to raw duty ticks is the port's job,
//! so the same mixing code runs on any timer resolution.

use core::fmt;

use embedded_hal::pwm::{self, SetDutyCycle};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::percent::percent_to_duty;

/// Output channel of a two-channel fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputChannel {
    /// Channel 1, warm white LEDs
    Warm = 1,
    /// Channel 2, cool white LEDs
    Cool = 2,
}

impl OutputChannel {
    pub const fn number(self) -> u8 {
        self as u8
    }
}

/// Per-channel duty writer
///
/// Implement this trait to support different hardware platforms.
/// The controller is generic over it.
pub trait DutyOutput {
    type Error: fmt::Debug;

    /// Prepare the hardware for the first write
    ///
    /// Called once by the controller before anything is written. An error
    /// here means the fixture cannot be driven at all.
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Set duty of one channel, in percent (0-100)
    fn set_duty(&mut self, channel: OutputChannel, percent: u8) -> Result<(), Self::Error>;
}

/// Timer setup of the reference fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PwmConfig {
    /// PWM frequency
    pub frequency_hz: u32,
    /// Duty resolution in bits
    pub resolution_bits: u8,
}

impl PwmConfig {
    /// 5 kHz, 13 bit
    pub const DEFAULT: Self = Self {
        frequency_hz: 5_000,
        resolution_bits: 13,
    };

    /// Largest raw duty value, `2^bits - 1`
    #[allow(clippy::cast_possible_truncation)]
    pub const fn max_duty(&self) -> u16 {
        if self.resolution_bits >= 16 {
            u16::MAX
        } else {
            ((1u32 << self.resolution_bits) - 1) as u16
        }
    }

    /// Convert a percentage to raw duty for this timer
    pub const fn percent_to_duty(&self, percent: u8) -> u16 {
        percent_to_duty(percent, self.max_duty())
    }
}

impl Default for PwmConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error of [`PwmOutput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PwmError {
    /// Channel reports zero duty range, timer is not configured
    Unconfigured(OutputChannel),
    /// The HAL rejected a write
    Write(OutputChannel, pwm::ErrorKind),
}

impl fmt::Display for PwmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unconfigured(channel) => {
                write!(f, "PWM channel {} is not configured", channel.number())
            }
            Self::Write(channel, kind) => {
                write!(f, "PWM channel {} write failed: {:?}", channel.number(), kind)
            }
        }
    }
}

/// [`DutyOutput`] over two `embedded-hal` PWM channels
///
/// Raw duty is `percent * max_duty_cycle() / 100` of the respective channel.
pub struct PwmOutput<W, C> {
    warm: W,
    cool: C,
}

impl<W: SetDutyCycle, C: SetDutyCycle> PwmOutput<W, C> {
    pub const fn new(warm: W, cool: C) -> Self {
        Self { warm, cool }
    }

    /// Give back the channels
    pub fn release(self) -> (W, C) {
        (self.warm, self.cool)
    }
}

impl<W: SetDutyCycle, C: SetDutyCycle> DutyOutput for PwmOutput<W, C> {
    type Error = PwmError;

    fn init(&mut self) -> Result<(), PwmError> {
        if self.warm.max_duty_cycle() == 0 {
            return Err(PwmError::Unconfigured(OutputChannel::Warm));
        }
        if self.cool.max_duty_cycle() == 0 {
            return Err(PwmError::Unconfigured(OutputChannel::Cool));
        }
        Ok(())
    }

    fn set_duty(&mut self, channel: OutputChannel, percent: u8) -> Result<(), PwmError> {
        let result = match channel {
            OutputChannel::Warm => write_percent(&mut self.warm, percent),
            OutputChannel::Cool => write_percent(&mut self.cool, percent),
        };
        result.map_err(|kind| PwmError::Write(channel, kind))
    }
}

fn write_percent<P: SetDutyCycle>(output: &mut P, percent: u8) -> Result<(), pwm::ErrorKind> {
    let duty = percent_to_duty(percent, output.max_duty_cycle());
    #[cfg(feature = "esp32-log")]
    println!("[PwmOutput.set_duty] {}% -> {}", percent, duty);
    output.set_duty_cycle(duty).map_err(|e| pwm::Error::kind(&e))
}
