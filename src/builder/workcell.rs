//! Builder for constructing validated workcells.

use crate::builder::error::BuildError;
use crate::core::{Device, Plate, Position, RobotArm, WorkcellState, DEFAULT_SPEED_MM_PER_S};

/// Builder for constructing a workcell with a fluent API.
///
/// Validation happens in `build()`: every plate must land in a distinct,
/// existing device, and the resulting state satisfies the occupancy and
/// mutual-exclusion invariants by construction.
///
/// # Example
///
/// ```rust
/// use workcell::builder::WorkcellBuilder;
/// use workcell::core::Position;
///
/// let cell = WorkcellBuilder::new("Screening Cell")
///     .device("Storage", Position::new(100.0, 200.0, 50.0))
///     .device("PlateReader", Position::new(1000.0, 200.0, 90.0))
///     .plate("CELL_CULTURE_PLATE_001", "Storage")
///     .build()
///     .unwrap();
///
/// assert!(cell.device("Storage").unwrap().is_occupied());
/// ```
pub struct WorkcellBuilder {
    name: String,
    home: Position,
    speed_mm_per_s: f64,
    devices: Vec<(String, Position)>,
    plates: Vec<(String, String)>,
}

impl WorkcellBuilder {
    /// Create a builder for a named workcell.
    ///
    /// The arm starts at [`Position::ORIGIN`] with the default speed
    /// unless overridden.
    pub fn new(name: impl Into<String>) -> Self {
        WorkcellBuilder {
            name: name.into(),
            home: Position::ORIGIN,
            speed_mm_per_s: DEFAULT_SPEED_MM_PER_S,
            devices: Vec::new(),
            plates: Vec::new(),
        }
    }

    /// Set the robot's home position (also its starting position).
    pub fn home(mut self, home: Position) -> Self {
        self.home = home;
        self
    }

    /// Set the arm's travel speed in mm/s.
    pub fn arm_speed(mut self, speed_mm_per_s: f64) -> Self {
        self.speed_mm_per_s = speed_mm_per_s;
        self
    }

    /// Add a device at a fixed position.
    pub fn device(mut self, name: impl Into<String>, position: Position) -> Self {
        self.devices.push((name.into(), position));
        self
    }

    /// Load a plate into a device at initialization.
    pub fn plate(mut self, id: impl Into<String>, device: impl Into<String>) -> Self {
        self.plates.push((id.into(), device.into()));
        self
    }

    /// Build the workcell.
    ///
    /// Returns an error if the roster is empty or inconsistent.
    pub fn build(self) -> Result<WorkcellState, BuildError> {
        if !(self.speed_mm_per_s.is_finite() && self.speed_mm_per_s > 0.0) {
            return Err(BuildError::InvalidSpeed {
                speed: self.speed_mm_per_s,
            });
        }
        if self.devices.is_empty() {
            return Err(BuildError::NoDevices);
        }

        let mut devices: Vec<Device> = Vec::with_capacity(self.devices.len());
        for (name, position) in self.devices {
            if devices.iter().any(|d| d.name() == name) {
                return Err(BuildError::DuplicateDevice { name });
            }
            devices.push(Device::new(name, position));
        }

        let mut plates: Vec<Plate> = Vec::with_capacity(self.plates.len());
        for (id, device_name) in self.plates {
            if plates.iter().any(|p| p.id() == id) {
                return Err(BuildError::DuplicatePlate { id });
            }
            let device = devices
                .iter_mut()
                .find(|d| d.name() == device_name)
                .ok_or_else(|| BuildError::UnknownDevice {
                    plate: id.clone(),
                    device: device_name.clone(),
                })?;
            if let Some(occupant) = device.occupant() {
                return Err(BuildError::DeviceOccupied {
                    plate: id,
                    device: device_name,
                    occupant: occupant.to_string(),
                });
            }
            device
                .mark_occupied(&id)
                .map_err(|_| BuildError::DeviceOccupied {
                    plate: id.clone(),
                    device: device_name.clone(),
                    occupant: String::new(),
                })?;
            plates.push(Plate::at_device(id, device_name));
        }

        let arm = RobotArm::with_speed(self.home, self.speed_mm_per_s);
        Ok(WorkcellState::from_parts(
            self.name,
            self.home,
            arm,
            devices,
            plates,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlateLocation;

    #[test]
    fn builder_requires_devices() {
        let result = WorkcellBuilder::new("Empty").build();
        assert!(matches!(result, Err(BuildError::NoDevices)));
    }

    #[test]
    fn builder_rejects_duplicate_device_names() {
        let result = WorkcellBuilder::new("Cell")
            .device("Storage", Position::ORIGIN)
            .device("Storage", Position::new(1.0, 0.0, 0.0))
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicateDevice {
                name: "Storage".to_string(),
            }
        );
    }

    #[test]
    fn builder_rejects_duplicate_plate_ids() {
        let result = WorkcellBuilder::new("Cell")
            .device("Storage", Position::ORIGIN)
            .device("Reader", Position::new(1.0, 0.0, 0.0))
            .plate("P1", "Storage")
            .plate("P1", "Reader")
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::DuplicatePlate {
                id: "P1".to_string(),
            }
        );
    }

    #[test]
    fn builder_rejects_plate_in_unknown_device() {
        let result = WorkcellBuilder::new("Cell")
            .device("Storage", Position::ORIGIN)
            .plate("P1", "Incubator")
            .build();
        assert!(matches!(result, Err(BuildError::UnknownDevice { .. })));
    }

    #[test]
    fn builder_rejects_two_plates_in_one_device() {
        let result = WorkcellBuilder::new("Cell")
            .device("Storage", Position::ORIGIN)
            .plate("P1", "Storage")
            .plate("P2", "Storage")
            .build();
        assert_eq!(
            result.unwrap_err(),
            BuildError::DeviceOccupied {
                plate: "P2".to_string(),
                device: "Storage".to_string(),
                occupant: "P1".to_string(),
            }
        );
    }

    #[test]
    fn builder_rejects_non_positive_speed() {
        let result = WorkcellBuilder::new("Cell")
            .device("Storage", Position::ORIGIN)
            .arm_speed(0.0)
            .build();
        assert!(matches!(result, Err(BuildError::InvalidSpeed { .. })));
    }

    #[test]
    fn fluent_api_builds_consistent_workcell() {
        let cell = WorkcellBuilder::new("Screening Cell")
            .home(Position::ORIGIN)
            .arm_speed(100.0)
            .device("Storage", Position::new(100.0, 200.0, 50.0))
            .device("Centrifuge", Position::new(550.0, 400.0, 75.0))
            .plate("PLATE_001", "Storage")
            .build()
            .unwrap();

        assert_eq!(cell.name(), "Screening Cell");
        assert_eq!(cell.devices().count(), 2);
        assert_eq!(cell.device("Storage").unwrap().occupant(), Some("PLATE_001"));
        assert_eq!(
            cell.plate("PLATE_001").unwrap().location(),
            &PlateLocation::AtDevice("Storage".to_string())
        );
        assert_eq!(cell.arm().current_position(), Position::ORIGIN);
        assert!(!cell.arm().is_holding());
    }
}
