//! Warm/cool crossfade
//!
//! Maps logical intent (power, brightness, CCT) to two channel levels.
//! The law is a plain linear crossfade scaled by brightness. Any LED
//! specific correction belongs to [`crate::calibration`] and is applied
//! to the result of [`compute`], never inside it.

use crate::percent::{PERCENT_MAX, saturate_percent, scale_percent};
use crate::state::LightState;

/// Output levels of both channels, in percent (0-100)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DutyPair {
    pub warm: u8,
    pub cool: u8,
}

impl DutyPair {
    /// Both channels dark
    pub const OFF: Self = Self { warm: 0, cool: 0 };

    pub const fn new(warm: u8, cool: u8) -> Self {
        Self { warm, cool }
    }

    /// Sum of both channels
    #[allow(clippy::cast_lossless)]
    pub const fn total(self) -> u16 {
        self.warm as u16 + self.cool as u16
    }
}

/// Compute channel levels for the given intent
///
/// * `power == false` always yields [`DutyPair::OFF`].
/// * `cct` moves light from the warm channel (0) to the cool one (100).
/// * Each channel is rounded down on its own, so `warm + cool` may be one
///   below `brightness` when `brightness * cct` is not a multiple of 100.
///
/// Inputs are expected in 0-100; larger values are saturated.
pub const fn compute(power: bool, brightness: u8, cct: u8) -> DutyPair {
    if !power {
        return DutyPair::OFF;
    }
    let brightness = saturate_percent(brightness);
    let cct = saturate_percent(cct);

    DutyPair {
        warm: scale_percent(brightness, PERCENT_MAX - cct),
        cool: scale_percent(brightness, cct),
    }
}

/// Compute channel levels for a [`LightState`]
pub const fn compute_state(state: &LightState) -> DutyPair {
    compute(state.power(), state.brightness(), state.cct())
}
