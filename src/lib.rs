#![no_std]

pub mod attribute;
pub mod calibration;
pub mod channel;
pub mod controller;
pub mod mixer;
pub mod output;
pub mod percent;
pub mod state;

pub use attribute::{AttributeUpdate, ParamValue, UpdateChannel, UpdateReceiver, UpdateSender};
pub use calibration::{Calibration, CalibrationConfig};
pub use controller::{InitError, LightController, LightControllerConfig};
pub use mixer::{DutyPair, compute};
pub use output::{DutyOutput, OutputChannel, PwmConfig, PwmError, PwmOutput};
pub use state::LightState;
