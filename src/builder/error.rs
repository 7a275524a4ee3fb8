//! Build errors for workcell construction.

use thiserror::Error;

/// Errors that can occur when building a workcell.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BuildError {
    #[error("No devices defined. Add at least one device before .build()")]
    NoDevices,

    #[error("Duplicate device name: {name}")]
    DuplicateDevice { name: String },

    #[error("Duplicate plate id: {id}")]
    DuplicatePlate { id: String },

    #[error("Plate {plate} references unknown device {device}")]
    UnknownDevice { plate: String, device: String },

    #[error("Cannot load plate {plate}: {device} already holds plate {occupant}")]
    DeviceOccupied {
        plate: String,
        device: String,
        occupant: String,
    },

    #[error("Arm speed must be positive, got {speed}")]
    InvalidSpeed { speed: f64 },
}
