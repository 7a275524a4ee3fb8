//! The workcell aggregate: arm, devices, and plates under one owner.
//!
//! `WorkcellState` replaces any notion of global device or plate
//! registries: the protocol runner owns one aggregate and every operation
//! goes through it, so there are no process-wide mutable singletons.

use super::arm::{RobotArm, Traversal};
use super::device::{Device, DeviceState};
use super::error::TransferError;
use super::plate::Plate;
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Outcome of a validated process step on a device.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Device running the process.
    pub device: String,
    /// Plate being processed.
    pub plate: String,
    /// Simulated processing time.
    pub duration: Duration,
}

/// Complete mutable state of one workcell.
///
/// Owns the robot arm, every device, and every plate. Operations resolve
/// names to state and delegate legality to [`RobotArm`] and [`Device`];
/// on failure nothing is mutated.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WorkcellState {
    name: String,
    home: Position,
    arm: RobotArm,
    devices: BTreeMap<String, Device>,
    plates: BTreeMap<String, Plate>,
}

impl WorkcellState {
    /// Assemble a workcell from pre-validated parts.
    ///
    /// Use [`WorkcellBuilder`](crate::builder::WorkcellBuilder) to
    /// construct a workcell with validation.
    pub(crate) fn from_parts(
        name: String,
        home: Position,
        arm: RobotArm,
        devices: Vec<Device>,
        plates: Vec<Plate>,
    ) -> Self {
        WorkcellState {
            name,
            home,
            arm,
            devices: devices
                .into_iter()
                .map(|d| (d.name().to_string(), d))
                .collect(),
            plates: plates
                .into_iter()
                .map(|p| (p.id().to_string(), p))
                .collect(),
        }
    }

    /// The workcell's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The robot's designated home position.
    pub fn home(&self) -> Position {
        self.home
    }

    /// Read-only view of the robot arm.
    pub fn arm(&self) -> &RobotArm {
        &self.arm
    }

    /// Look up a device by name.
    pub fn device(&self, name: &str) -> Option<&Device> {
        self.devices.get(name)
    }

    /// All devices, ordered by name.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.devices.values()
    }

    /// Look up a plate by id.
    pub fn plate(&self, id: &str) -> Option<&Plate> {
        self.plates.get(id)
    }

    /// All plates, ordered by id.
    pub fn plates(&self) -> impl Iterator<Item = &Plate> {
        self.plates.values()
    }

    /// Move the arm to a device's position. Always succeeds for a known
    /// device; the returned [`Traversal`] carries the simulated duration.
    pub fn move_to_device(&mut self, device_name: &str) -> Result<Traversal, TransferError> {
        let target = self
            .devices
            .get(device_name)
            .ok_or_else(|| TransferError::UnknownDevice {
                name: device_name.to_string(),
            })?
            .position();
        Ok(self.arm.move_to(target))
    }

    /// Move the arm back to the home position, with no plate interaction.
    pub fn return_home(&mut self) -> Traversal {
        self.arm.move_to(self.home)
    }

    /// Pick the named plate out of the named device.
    pub fn pick(&mut self, device_name: &str, plate_id: &str) -> Result<(), TransferError> {
        let device =
            self.devices
                .get_mut(device_name)
                .ok_or_else(|| TransferError::UnknownDevice {
                    name: device_name.to_string(),
                })?;
        let plate = self
            .plates
            .get_mut(plate_id)
            .ok_or_else(|| TransferError::UnknownPlate {
                id: plate_id.to_string(),
            })?;
        self.arm.pick(device, plate)
    }

    /// Place the currently gripped plate into the named device.
    pub fn place(&mut self, device_name: &str) -> Result<(), TransferError> {
        let device =
            self.devices
                .get_mut(device_name)
                .ok_or_else(|| TransferError::UnknownDevice {
                    name: device_name.to_string(),
                })?;
        let plate_id = match self.arm.gripped_plate() {
            Some(id) => id.to_string(),
            None => {
                return Err(TransferError::GripperEmpty {
                    device: device_name.to_string(),
                })
            }
        };
        let plate = self
            .plates
            .get_mut(&plate_id)
            .ok_or(TransferError::UnknownPlate { id: plate_id })?;
        self.arm.place(device, plate)
    }

    /// Begin processing the expected plate in the named device.
    ///
    /// Fails with [`TransferError::NoPlate`] unless the device currently
    /// holds that plate. On success the device is Busy until
    /// [`finish_process`](Self::finish_process); the caller owns the
    /// simulated wait in between.
    pub fn start_process(
        &mut self,
        device_name: &str,
        plate_id: &str,
        duration: Duration,
    ) -> Result<ProcessOutcome, TransferError> {
        let device =
            self.devices
                .get_mut(device_name)
                .ok_or_else(|| TransferError::UnknownDevice {
                    name: device_name.to_string(),
                })?;
        if device.occupant() != Some(plate_id) {
            return Err(TransferError::NoPlate {
                device: device_name.to_string(),
            });
        }
        device.set_state(DeviceState::Busy);
        Ok(ProcessOutcome {
            device: device_name.to_string(),
            plate: plate_id.to_string(),
            duration,
        })
    }

    /// Complete a process: the device returns to Idle. Plate location is
    /// untouched.
    pub fn finish_process(&mut self, device_name: &str) -> Result<(), TransferError> {
        let device =
            self.devices
                .get_mut(device_name)
                .ok_or_else(|| TransferError::UnknownDevice {
                    name: device_name.to_string(),
                })?;
        device.set_state(DeviceState::Idle);
        Ok(())
    }
}
