//! Workcell devices: named stations a plate can occupy.

use super::error::StateError;
use super::position::Position;
use serde::{Deserialize, Serialize};

/// Operational state of a device.
///
/// Informational only: it feeds logging and processing-duration display
/// and never gates a transfer. Occupancy is what gates transfers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum DeviceState {
    /// Ready to accept or release a plate.
    Idle,
    /// Currently running a process on its plate.
    Busy,
    /// Faulted; still reported in logs but not acted on by the core.
    Error,
}

impl DeviceState {
    /// The state's name for display and logging.
    pub fn name(&self) -> &str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Busy",
            Self::Error => "Error",
        }
    }

    /// Check if this is the error state.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A named station with a fixed position and a single plate slot.
///
/// One device instance exists per physical station. Devices are created at
/// system initialization and mutated only by robot arm operations; they are
/// never destroyed during a run.
///
/// Invariant: `occupant` is `Some(plate)` exactly when that plate's
/// location is this device.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Device {
    name: String,
    position: Position,
    occupant: Option<String>,
    state: DeviceState,
}

impl Device {
    /// Create an empty, idle device at a fixed position.
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Device {
            name: name.into(),
            position,
            occupant: None,
            state: DeviceState::Idle,
        }
    }

    /// The device's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The device's fixed position.
    pub fn position(&self) -> Position {
        self.position
    }

    /// The id of the plate currently in this device, if any.
    pub fn occupant(&self) -> Option<&str> {
        self.occupant.as_deref()
    }

    /// Whether the device currently holds a plate.
    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    /// The device's operational state.
    pub fn state(&self) -> DeviceState {
        self.state
    }

    /// Set the operational state.
    ///
    /// No transition checks: any state may follow any other. Occupancy is
    /// the only gating invariant and it is guarded separately.
    pub fn set_state(&mut self, state: DeviceState) {
        self.state = state;
    }

    /// Mark the device occupied by `plate_id`.
    ///
    /// Fails with [`StateError::AlreadyOccupied`] if a plate is already
    /// present; the existing occupant is untouched on failure.
    pub fn mark_occupied(&mut self, plate_id: impl Into<String>) -> Result<(), StateError> {
        if let Some(occupant) = &self.occupant {
            return Err(StateError::AlreadyOccupied {
                device: self.name.clone(),
                occupant: occupant.clone(),
            });
        }
        self.occupant = Some(plate_id.into());
        Ok(())
    }

    /// Mark the device free, returning the plate id that was present.
    ///
    /// Fails with [`StateError::AlreadyFree`] if no plate is present.
    pub fn mark_free(&mut self) -> Result<String, StateError> {
        self.occupant.take().ok_or(StateError::AlreadyFree {
            device: self.name.clone(),
        })
    }
}
