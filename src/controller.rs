//! Light controller
//!
//! Owns the logical light state and the output port. Every accepted
//! change recomputes both channels and writes both of them, so the
//! hardware never drifts from the logical state.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::attribute::{AttributeUpdate, ParamValue, UpdateReceiver};
use crate::calibration::{Calibration, CalibrationConfig};
use crate::mixer::{DutyPair, compute_state};
use crate::output::{DutyOutput, OutputChannel};
use crate::state::LightState;

/// Configuration for the light controller
#[derive(Debug, Clone, Copy, Default)]
pub struct LightControllerConfig {
    /// State applied right after initialization
    pub initial: LightState,
    /// Output calibration
    pub calibration: CalibrationConfig,
}

/// Controller could not be brought up
///
/// The fixture has no safe degraded mode with unconfigured outputs,
/// firmware should treat this as fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError<E> {
    /// Output port failed to initialize
    Output(E),
}

impl<E: fmt::Debug> fmt::Display for InitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Output(e) => write!(f, "output initialization failed: {:?}", e),
        }
    }
}

/// Light controller - applies attribute updates to the hardware
pub struct LightController<O: DutyOutput> {
    output: O,
    calibration: Calibration,
    state: LightState,
    last_output: DutyPair,
    write_failures: u32,
}

impl<O: DutyOutput> LightController<O> {
    /// Initialize the output and apply the initial state
    ///
    /// After this returns the fixture shows `config.initial`, without
    /// waiting for the first external update.
    pub fn new(mut output: O, config: &LightControllerConfig) -> Result<Self, InitError<O::Error>> {
        output.init().map_err(InitError::Output)?;

        let mut controller = Self {
            output,
            calibration: Calibration::new(&config.calibration),
            state: config.initial,
            last_output: DutyPair::OFF,
            write_failures: 0,
        };
        controller.recompute_and_apply();
        Ok(controller)
    }

    /// Current logical state
    pub const fn state(&self) -> LightState {
        self.state
    }

    /// Levels of the last write, in percent
    pub const fn last_output(&self) -> DutyPair {
        self.last_output
    }

    /// Number of channel writes that failed since start
    pub const fn write_failures(&self) -> u32 {
        self.write_failures
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Stop the controller and give back the output
    pub fn release(self) -> O {
        self.output
    }

    /// Store power state
    ///
    /// Does not touch the hardware. Call [`Self::recompute_and_apply`]
    /// afterwards, or use [`Self::apply`] which does both.
    pub fn set_power(&mut self, power: bool) {
        self.state = self.state.with_power(power);
    }

    /// Store brightness (clamped to 0-100) and apply
    pub fn set_brightness(&mut self, brightness: i32) {
        self.state = self.state.with_brightness(brightness);
        self.recompute_and_apply();
    }

    /// Store CCT (clamped to 0-100) and apply
    pub fn set_cct(&mut self, cct: i32) {
        self.state = self.state.with_cct(cct);
        self.recompute_and_apply();
    }

    /// Apply one attribute update
    ///
    /// Power updates are applied immediately too.
    pub fn apply(&mut self, update: AttributeUpdate) {
        match update {
            AttributeUpdate::Power(power) => {
                self.set_power(power);
                self.recompute_and_apply();
            }
            AttributeUpdate::Brightness(brightness) => self.set_brightness(brightness),
            AttributeUpdate::Cct(cct) => self.set_cct(cct),
        }
    }

    /// Handle a raw parameter write from the platform
    ///
    /// Returns `false` if the write was not recognised. Nothing is changed
    /// or written in that case.
    pub fn handle_param_write(&mut self, name: &str, value: ParamValue) -> bool {
        let Some(update) = AttributeUpdate::parse(name, value) else {
            #[cfg(feature = "esp32-log")]
            println!("[LightController.handle_param_write] ignoring {}: {:?}", name, value);
            return false;
        };
        self.apply(update);
        true
    }

    /// Apply several updates and write the result once
    ///
    /// Avoids visible intermediate states when the platform delivers a
    /// group of changes together. Returns the number of applied updates;
    /// nothing is written if it is zero.
    pub fn apply_batch<I>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = AttributeUpdate>,
    {
        let mut applied = 0;
        for update in updates {
            self.merge(update);
            applied += 1;
        }
        if applied > 0 {
            self.recompute_and_apply();
        }
        applied
    }

    /// Drain all queued updates as one batch
    pub fn process_pending<const SIZE: usize>(&mut self, updates: &UpdateReceiver<'_, SIZE>) -> usize {
        self.apply_batch(updates.drain())
    }

    /// Recompute both channels from the current state and write them
    ///
    /// Warm (channel 1) is written first, cool (channel 2) second. A failed
    /// write is logged and counted; it never stops the other channel.
    pub fn recompute_and_apply(&mut self) -> DutyPair {
        let mixed = compute_state(&self.state);
        let levels = self.calibration.apply(mixed, self.state.cct());

        #[cfg(feature = "esp32-log")]
        println!(
            "[LightController.recompute_and_apply] {:?} -> warm={} cool={}",
            self.state, levels.warm, levels.cool
        );

        self.write(OutputChannel::Warm, levels.warm);
        self.write(OutputChannel::Cool, levels.cool);
        self.last_output = levels;
        levels
    }

    fn merge(&mut self, update: AttributeUpdate) {
        self.state = match update {
            AttributeUpdate::Power(power) => self.state.with_power(power),
            AttributeUpdate::Brightness(brightness) => self.state.with_brightness(brightness),
            AttributeUpdate::Cct(cct) => self.state.with_cct(cct),
        };
    }

    fn write(&mut self, channel: OutputChannel, percent: u8) {
        if let Err(_e) = self.output.set_duty(channel, percent) {
            #[cfg(feature = "esp32-log")]
            println!(
                "[LightController.write] channel {} write failed: {:?}",
                channel.number(),
                _e
            );
            self.write_failures = self.write_failures.saturating_add(1);
        }
    }
}
