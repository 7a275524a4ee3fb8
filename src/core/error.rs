//! Error types for workcell operations.
//!
//! Every failure here is a caller-recoverable logical error: it describes
//! a physically impossible action, not a transient fault. Nothing in the
//! core panics or retries; the protocol runner records the error and
//! aborts the remaining protocol.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by flipping a device's occupancy flag out of order.
///
/// The arm checks its own preconditions before touching a device, so in a
/// consistent workcell these are unreachable; they exist so that occupancy
/// transitions are guarded at the device itself rather than trusted.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum StateError {
    #[error("{device} is already occupied by plate {occupant}")]
    AlreadyOccupied { device: String, occupant: String },

    #[error("{device} is already free")]
    AlreadyFree { device: String },
}

/// Errors raised by illegal transfer operations.
///
/// Each robot arm operation fails locally with one of these kinds. The
/// failing operation leaves all workcell state unchanged: either every
/// invariant-preserving mutation happens, or none does.
#[derive(Debug, Clone, Error, PartialEq, Serialize, Deserialize)]
pub enum TransferError {
    /// Attempted pick while already holding a plate (double-pick).
    #[error("gripper already holds plate {held}; cannot pick {requested} from {device}")]
    GripperOccupied {
        held: String,
        requested: String,
        device: String,
    },

    /// Attempted pick from a device that does not hold the expected plate.
    #[error("plate {expected} is not available to pick at {device}")]
    EmptyLocation { device: String, expected: String },

    /// Attempted place with nothing gripped.
    #[error("gripper is empty; nothing to place at {device}")]
    GripperEmpty { device: String },

    /// Attempted place into an occupied device.
    #[error("{device} already holds plate {occupant}")]
    OccupiedLocation { device: String, occupant: String },

    /// Attempted process on an empty device.
    #[error("{device} has no plate to process")]
    NoPlate { device: String },

    /// A protocol step referenced a device that is not in the roster.
    #[error("unknown device: {name}")]
    UnknownDevice { name: String },

    /// A protocol step referenced a plate that was never loaded.
    #[error("unknown plate: {id}")]
    UnknownPlate { id: String },

    /// Occupancy flag flipped out of order; indicates an inconsistent
    /// workcell rather than an illegal protocol step.
    #[error(transparent)]
    Occupancy(#[from] StateError),
}
