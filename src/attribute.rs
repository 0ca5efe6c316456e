//! Inbound attribute updates
//!
//! The platform delivers parameter writes as `{name, value}` pairs.
//! This module turns them into typed [`AttributeUpdate`]s. Names the
//! light does not know are not an error: they are reported as `None`
//! and the caller drops them.

use crate::channel::{Channel, Receiver, Sender, TrySendError};

/// Name of the power attribute
pub const ATTRIBUTE_POWER: &str = "power";
/// Name of the brightness attribute
pub const ATTRIBUTE_BRIGHTNESS: &str = "brightness";
/// Name of the CCT attribute
pub const ATTRIBUTE_CCT: &str = "cct";

/// Raw parameter value as delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
}

/// Single attribute change
///
/// Integer payloads are untrusted and may be out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUpdate {
    Power(bool),
    Brightness(i32),
    Cct(i32),
}

impl AttributeUpdate {
    /// Parse a raw parameter write
    ///
    /// Returns `None` for unknown names and for brightness/CCT writes that
    /// carry a boolean. A power write carrying an integer is read as
    /// `value != 0`.
    pub fn parse(name: &str, value: ParamValue) -> Option<Self> {
        match (name, value) {
            (ATTRIBUTE_POWER, ParamValue::Bool(power)) => Some(Self::Power(power)),
            (ATTRIBUTE_POWER, ParamValue::Int(raw)) => Some(Self::Power(raw != 0)),
            (ATTRIBUTE_BRIGHTNESS, ParamValue::Int(raw)) => Some(Self::Brightness(raw)),
            (ATTRIBUTE_CCT, ParamValue::Int(raw)) => Some(Self::Cct(raw)),
            _ => None,
        }
    }

    /// Attribute name, as used on the wire
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Power(_) => ATTRIBUTE_POWER,
            Self::Brightness(_) => ATTRIBUTE_BRIGHTNESS,
            Self::Cct(_) => ATTRIBUTE_CCT,
        }
    }
}

/// Type alias for update sender
pub type UpdateSender<'a, const SIZE: usize> = Sender<'a, AttributeUpdate, SIZE>;

/// Type alias for update receiver
pub type UpdateReceiver<'a, const SIZE: usize> = Receiver<'a, AttributeUpdate, SIZE>;

/// Type alias for the update channel
pub type UpdateChannel<const SIZE: usize> = Channel<AttributeUpdate, SIZE>;

impl<const SIZE: usize> UpdateSender<'_, SIZE> {
    /// Parse a raw parameter write and queue it
    ///
    /// Returns `Ok(false)` if the write was not recognised and nothing was
    /// queued.
    pub fn forward(
        &self,
        name: &str,
        value: ParamValue,
    ) -> Result<bool, TrySendError<AttributeUpdate>> {
        let Some(update) = AttributeUpdate::parse(name, value) else {
            return Ok(false);
        };
        self.try_send(update)?;
        Ok(true)
    }
}
