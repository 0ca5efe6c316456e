use crate::percent::{clamp_percent, saturate_percent};

/// Power state after boot
pub const DEFAULT_POWER: bool = true;
/// Brightness after boot, percent
pub const DEFAULT_BRIGHTNESS: u8 = 10;
/// Warm/cool mix after boot, percent (0 = warm, 100 = cool)
pub const DEFAULT_CCT: u8 = 50;

/// Logical light state
///
/// Brightness and CCT are kept in the 0-100 range. Values coming from
/// the outside are clamped on the way in, see [`LightState::with_brightness`]
/// and [`LightState::with_cct`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightState {
    power: bool,
    brightness: u8,
    cct: u8,
}

impl LightState {
    /// Boot state of the fixture
    pub const DEFAULT: Self = Self {
        power: DEFAULT_POWER,
        brightness: DEFAULT_BRIGHTNESS,
        cct: DEFAULT_CCT,
    };

    /// Create a state, saturating brightness and CCT to 100
    pub const fn new(power: bool, brightness: u8, cct: u8) -> Self {
        Self {
            power,
            brightness: saturate_percent(brightness),
            cct: saturate_percent(cct),
        }
    }

    pub const fn power(&self) -> bool {
        self.power
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn cct(&self) -> u8 {
        self.cct
    }

    pub const fn with_power(self, power: bool) -> Self {
        Self { power, ..self }
    }

    /// Replace brightness with an untrusted value, clamped to 0-100
    pub const fn with_brightness(self, brightness: i32) -> Self {
        Self {
            brightness: clamp_percent(brightness),
            ..self
        }
    }

    /// Replace CCT with an untrusted value, clamped to 0-100
    pub const fn with_cct(self, cct: i32) -> Self {
        Self {
            cct: clamp_percent(cct),
            ..self
        }
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::DEFAULT
    }
}
