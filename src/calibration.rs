//! Per-fixture output calibration
//!
//! Warm and cool LED chip sets differ in efficiency, and a 50/50 mix
//! looks brighter than either end. This stage compensates for that on
//! top of the crossfade result. All factors are per-mille (1000 = 1.0)
//! and can only dim a channel.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::mixer::DutyPair;
use crate::percent::{PERCENT_MAX, saturate_percent};

/// Unity factor, per-mille
pub const PER_MILLE: u16 = 1000;

const MIDPOINT: u8 = PERCENT_MAX / 2;

/// Calibration factors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationConfig {
    /// Warm channel scale, per-mille
    pub warm_scale: u16,
    /// Cool channel scale, per-mille
    pub cool_scale: u16,
    /// Attenuation at CCT 50, per-mille. Fades linearly to zero at both ends.
    pub midpoint_drop: u16,
}

impl CalibrationConfig {
    /// Pass-through
    pub const IDENTITY: Self = Self {
        warm_scale: PER_MILLE,
        cool_scale: PER_MILLE,
        midpoint_drop: 0,
    };

    /// Bench-measured tuning of the reference warm/cool fixture
    ///
    /// Cool chips measured ~15% brighter than warm at equal duty, and the
    /// 50/50 mix ~4% brighter than the ends.
    pub const MEASURED: Self = Self {
        warm_scale: PER_MILLE,
        cool_scale: 846,
        midpoint_drop: 40,
    };

    pub const fn is_identity(&self) -> bool {
        self.warm_scale >= PER_MILLE && self.cool_scale >= PER_MILLE && self.midpoint_drop == 0
    }
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Calibration stage applied after the mixer
#[derive(Debug, Clone, Copy)]
pub struct Calibration {
    warm_scale: u16,
    cool_scale: u16,
    midpoint_drop: u16,
}

impl Calibration {
    pub const fn new(config: &CalibrationConfig) -> Self {
        Self {
            warm_scale: clamp_per_mille(config.warm_scale),
            cool_scale: clamp_per_mille(config.cool_scale),
            midpoint_drop: clamp_per_mille(config.midpoint_drop),
        }
    }

    /// Check if calibration changes anything
    pub const fn is_active(&self) -> bool {
        self.warm_scale != PER_MILLE || self.cool_scale != PER_MILLE || self.midpoint_drop != 0
    }

    /// Brightness correction for the given mix, per-mille
    ///
    /// `1000 - drop` at CCT 50, `1000` at CCT 0 and 100.
    #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
    pub const fn midpoint_correction(&self, cct: u8) -> u16 {
        let cct = saturate_percent(cct);
        let distance = cct.abs_diff(MIDPOINT);
        let closeness = (MIDPOINT - distance) as u32;
        let dip = (self.midpoint_drop as u32 * closeness) / MIDPOINT as u32;
        PER_MILLE - dip as u16
    }

    /// Apply calibration to mixer output
    pub fn apply(&self, levels: DutyPair, cct: u8) -> DutyPair {
        if !self.is_active() {
            return levels;
        }

        let correction = self.midpoint_correction(cct);
        let calibrated = DutyPair {
            warm: scale_level(levels.warm, self.warm_scale, correction),
            cool: scale_level(levels.cool, self.cool_scale, correction),
        };
        #[cfg(feature = "esp32-log")]
        println!(
            "[Calibration.apply] cct={} correction={} {:?} -> {:?}",
            cct, correction, levels, calibrated
        );
        calibrated
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(&CalibrationConfig::IDENTITY)
    }
}

const fn clamp_per_mille(value: u16) -> u16 {
    if value > PER_MILLE { PER_MILLE } else { value }
}

/// `floor(level * scale * correction / 1e6)`, single rounding step
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
const fn scale_level(level: u8, scale: u16, correction: u16) -> u8 {
    let numerator = level as u64 * scale as u64 * correction as u64;
    let denominator = PER_MILLE as u64 * PER_MILLE as u64;
    let scaled = numerator / denominator;
    saturate_percent(scaled as u8)
}
