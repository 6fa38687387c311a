use crate::error::{Result, RhvmError};
use crate::types::{PowerState, RawPowerState};
use tracing::trace;

/// Map a provider-reported power state onto the canonical on/off/suspended.
///
/// Unknown values are an error; choosing a fallback is left to the caller.
pub fn normalize(raw: &RawPowerState) -> Result<PowerState> {
    let state = match raw.as_str().trim().to_lowercase().as_str() {
        "up" => PowerState::On,
        "down" => PowerState::Off,
        "suspended" => PowerState::Suspended,
        _ => return Err(RhvmError::UnrecognizedPowerState(raw.to_string())),
    };

    trace!("Normalized power state {:?} to {}", raw.as_str(), state);
    Ok(state)
}

impl TryFrom<&RawPowerState> for PowerState {
    type Error = RhvmError;

    fn try_from(raw: &RawPowerState) -> Result<Self> {
        normalize(raw)
    }
}
