//! Core workcell types and transfer logic.
//!
//! This module contains the pure core of the simulator:
//! - Spatial positions and distance
//! - Devices with guarded occupancy
//! - Plates and their single-valued locations
//! - The robot arm's atomic move/pick/place operations
//! - The `WorkcellState` aggregate that owns all of the above
//!
//! Nothing here prints, sleeps, or performs I/O; operations return plain
//! data (outcomes and typed errors) for the protocol layer to act on.

mod arm;
mod device;
mod error;
mod plate;
mod position;
mod workcell;

pub use arm::{RobotArm, Traversal, DEFAULT_SPEED_MM_PER_S};
pub use device::{Device, DeviceState};
pub use error::{StateError, TransferError};
pub use plate::{Plate, PlateLocation};
pub use position::Position;
pub use workcell::{ProcessOutcome, WorkcellState};
