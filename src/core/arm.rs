//! The robot arm: gripper state and the transfer state machine core.
//!
//! Every operation checks all of its preconditions before mutating
//! anything, so a failed operation leaves the arm, the device, and the
//! plate exactly as they were. The arm never sleeps; travel time is a pure
//! computation returned to the caller, which decides whether to wait.

use super::device::Device;
use super::error::TransferError;
use super::plate::{Plate, PlateLocation};
use super::position::Position;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default arm travel speed, millimeters per second.
pub const DEFAULT_SPEED_MM_PER_S: f64 = 100.0;

/// Outcome of a completed arm movement.
///
/// Carries the derived travel duration so the scheduling layer (or a test
/// harness) can choose to actually wait on it or skip it.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Traversal {
    /// Position the arm started from.
    pub from: Position,
    /// Position the arm arrived at.
    pub to: Position,
    /// Straight-line distance covered, in millimeters.
    pub distance_mm: f64,
    /// Simulated travel time at the arm's configured speed.
    pub duration: Duration,
}

/// A simulated robot arm with a single-slot gripper.
///
/// Invariant: `gripped_plate` is `Some(id)` exactly when that plate's
/// location is [`PlateLocation::InGripper`]; the arm can grip at most one
/// plate.
///
/// # Example
///
/// ```rust
/// use workcell::core::{Device, Plate, Position, RobotArm};
///
/// let mut arm = RobotArm::new(Position::ORIGIN);
/// let mut storage = Device::new("Storage", Position::new(100.0, 200.0, 50.0));
/// let mut plate = Plate::at_device("PLATE_001", "Storage");
/// storage.mark_occupied("PLATE_001").unwrap();
///
/// arm.move_to(storage.position());
/// arm.pick(&mut storage, &mut plate).unwrap();
/// assert_eq!(arm.gripped_plate(), Some("PLATE_001"));
/// assert!(!storage.is_occupied());
/// ```
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RobotArm {
    current_position: Position,
    gripped_plate: Option<String>,
    speed_mm_per_s: f64,
    moves: usize,
    distance_traveled_mm: f64,
}

impl RobotArm {
    /// Create an arm at the given position with the default speed.
    pub fn new(position: Position) -> Self {
        Self::with_speed(position, DEFAULT_SPEED_MM_PER_S)
    }

    /// Create an arm with an explicit travel speed (mm/s, must be positive).
    pub fn with_speed(position: Position, speed_mm_per_s: f64) -> Self {
        RobotArm {
            current_position: position,
            gripped_plate: None,
            speed_mm_per_s,
            moves: 0,
            distance_traveled_mm: 0.0,
        }
    }

    /// Where the arm currently is.
    pub fn current_position(&self) -> Position {
        self.current_position
    }

    /// The id of the gripped plate, if any.
    pub fn gripped_plate(&self) -> Option<&str> {
        self.gripped_plate.as_deref()
    }

    /// Whether the gripper holds a plate.
    pub fn is_holding(&self) -> bool {
        self.gripped_plate.is_some()
    }

    /// Configured travel speed in mm/s.
    pub fn speed_mm_per_s(&self) -> f64 {
        self.speed_mm_per_s
    }

    /// Number of completed movements.
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Cumulative straight-line distance covered, in millimeters.
    pub fn distance_traveled_mm(&self) -> f64 {
        self.distance_traveled_mm
    }

    /// Move the arm to a target position.
    ///
    /// Always succeeds: no obstacles are modeled. Returns the traversal
    /// with its simulated duration; the arm itself does not wait.
    pub fn move_to(&mut self, target: Position) -> Traversal {
        let from = self.current_position;
        let distance_mm = from.distance_to(&target);
        let duration = Duration::try_from_secs_f64(distance_mm / self.speed_mm_per_s)
            .unwrap_or(Duration::MAX);

        self.current_position = target;
        self.moves += 1;
        self.distance_traveled_mm += distance_mm;

        debug!(?from, to = ?target, distance_mm, "arm moved");
        Traversal {
            from,
            to: target,
            distance_mm,
            duration,
        }
    }

    /// Pick the expected plate out of a device.
    ///
    /// Preconditions, checked before any mutation:
    /// - the gripper is empty, else [`TransferError::GripperOccupied`];
    /// - the device holds exactly the expected plate, else
    ///   [`TransferError::EmptyLocation`].
    ///
    /// On success the device is freed, the plate's location becomes
    /// [`PlateLocation::InGripper`], and the gripper holds the plate.
    pub fn pick(&mut self, device: &mut Device, plate: &mut Plate) -> Result<(), TransferError> {
        if let Some(held) = &self.gripped_plate {
            return Err(TransferError::GripperOccupied {
                held: held.clone(),
                requested: plate.id().to_string(),
                device: device.name().to_string(),
            });
        }
        if device.occupant() != Some(plate.id()) {
            return Err(TransferError::EmptyLocation {
                device: device.name().to_string(),
                expected: plate.id().to_string(),
            });
        }

        let plate_id = device.mark_free()?;
        plate.relocate(PlateLocation::InGripper);
        self.gripped_plate = Some(plate_id);

        debug!(plate = plate.id(), device = device.name(), "plate picked");
        Ok(())
    }

    /// Place the gripped plate into a device.
    ///
    /// Preconditions, checked before any mutation:
    /// - the gripper holds this plate, else [`TransferError::GripperEmpty`];
    /// - the device is free, else [`TransferError::OccupiedLocation`].
    ///
    /// On success the device holds the plate, the plate's location becomes
    /// the device, and the gripper is empty.
    pub fn place(&mut self, device: &mut Device, plate: &mut Plate) -> Result<(), TransferError> {
        if self.gripped_plate.as_deref() != Some(plate.id()) {
            return Err(TransferError::GripperEmpty {
                device: device.name().to_string(),
            });
        }
        if let Some(occupant) = device.occupant() {
            return Err(TransferError::OccupiedLocation {
                device: device.name().to_string(),
                occupant: occupant.to_string(),
            });
        }

        device.mark_occupied(plate.id())?;
        plate.relocate(PlateLocation::AtDevice(device.name().to_string()));
        self.gripped_plate = None;

        debug!(plate = plate.id(), device = device.name(), "plate placed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupied_device(name: &str, plate_id: &str) -> (Device, Plate) {
        let mut device = Device::new(name, Position::new(100.0, 200.0, 50.0));
        device.mark_occupied(plate_id).unwrap();
        (device, Plate::at_device(plate_id, name))
    }

    #[test]
    fn move_to_updates_position_and_statistics() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let target = Position::new(300.0, 400.0, 0.0);

        let traversal = arm.move_to(target);

        assert_eq!(arm.current_position(), target);
        assert_eq!(traversal.distance_mm, 500.0);
        assert_eq!(traversal.duration, Duration::from_secs(5));
        assert_eq!(arm.moves(), 1);
        assert_eq!(arm.distance_traveled_mm(), 500.0);
    }

    #[test]
    fn move_to_same_position_takes_no_time() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let traversal = arm.move_to(Position::ORIGIN);
        assert_eq!(traversal.distance_mm, 0.0);
        assert_eq!(traversal.duration, Duration::ZERO);
    }

    #[test]
    fn travel_duration_scales_with_speed() {
        let mut arm = RobotArm::with_speed(Position::ORIGIN, 200.0);
        let traversal = arm.move_to(Position::new(300.0, 400.0, 0.0));
        assert_eq!(traversal.duration, Duration::from_millis(2500));
    }

    #[test]
    fn pick_transfers_plate_to_gripper() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let (mut device, mut plate) = occupied_device("Storage", "PLATE_001");

        arm.pick(&mut device, &mut plate).unwrap();

        assert_eq!(arm.gripped_plate(), Some("PLATE_001"));
        assert!(!device.is_occupied());
        assert_eq!(plate.location(), &PlateLocation::InGripper);
    }

    #[test]
    fn double_pick_fails_and_leaves_first_pick_intact() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let (mut storage, mut plate_a) = occupied_device("Storage", "PLATE_A");
        let (mut reader, mut plate_b) = occupied_device("PlateReader", "PLATE_B");

        arm.pick(&mut storage, &mut plate_a).unwrap();
        let err = arm.pick(&mut reader, &mut plate_b).unwrap_err();

        assert_eq!(
            err,
            TransferError::GripperOccupied {
                held: "PLATE_A".to_string(),
                requested: "PLATE_B".to_string(),
                device: "PlateReader".to_string(),
            }
        );
        // First pick unchanged; second device untouched.
        assert_eq!(arm.gripped_plate(), Some("PLATE_A"));
        assert_eq!(reader.occupant(), Some("PLATE_B"));
        assert!(plate_b.is_at("PlateReader"));
    }

    #[test]
    fn pick_from_empty_device_fails() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let mut device = Device::new("Storage", Position::ORIGIN);
        let mut plate = Plate::unloaded("PLATE_001");

        let err = arm.pick(&mut device, &mut plate).unwrap_err();

        assert_eq!(
            err,
            TransferError::EmptyLocation {
                device: "Storage".to_string(),
                expected: "PLATE_001".to_string(),
            }
        );
        assert!(!arm.is_holding());
    }

    #[test]
    fn pick_of_unexpected_plate_fails() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let (mut device, _) = occupied_device("Storage", "OTHER_PLATE");
        let mut expected = Plate::unloaded("PLATE_001");

        let err = arm.pick(&mut device, &mut expected).unwrap_err();

        assert!(matches!(err, TransferError::EmptyLocation { .. }));
        assert_eq!(device.occupant(), Some("OTHER_PLATE"));
    }

    #[test]
    fn place_transfers_plate_to_device() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let (mut storage, mut plate) = occupied_device("Storage", "PLATE_001");
        let mut centrifuge = Device::new("Centrifuge", Position::new(550.0, 400.0, 75.0));

        arm.pick(&mut storage, &mut plate).unwrap();
        arm.place(&mut centrifuge, &mut plate).unwrap();

        assert!(!arm.is_holding());
        assert_eq!(centrifuge.occupant(), Some("PLATE_001"));
        assert!(plate.is_at("Centrifuge"));
    }

    #[test]
    fn place_with_empty_gripper_fails() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let mut device = Device::new("Centrifuge", Position::ORIGIN);
        let mut plate = Plate::unloaded("PLATE_001");

        let err = arm.place(&mut device, &mut plate).unwrap_err();

        assert_eq!(
            err,
            TransferError::GripperEmpty {
                device: "Centrifuge".to_string(),
            }
        );
        assert!(!device.is_occupied());
    }

    #[test]
    fn place_into_occupied_device_fails_without_mutation() {
        let mut arm = RobotArm::new(Position::ORIGIN);
        let (mut storage, mut plate) = occupied_device("Storage", "PLATE_001");
        let (mut target, _) = occupied_device("Centrifuge", "OTHER_PLATE");

        arm.pick(&mut storage, &mut plate).unwrap();
        let err = arm.place(&mut target, &mut plate).unwrap_err();

        assert_eq!(
            err,
            TransferError::OccupiedLocation {
                device: "Centrifuge".to_string(),
                occupant: "OTHER_PLATE".to_string(),
            }
        );
        // Device occupancy unchanged; plate still gripped.
        assert_eq!(target.occupant(), Some("OTHER_PLATE"));
        assert_eq!(arm.gripped_plate(), Some("PLATE_001"));
        assert_eq!(plate.location(), &PlateLocation::InGripper);
    }

    #[test]
    fn arm_serializes_correctly() {
        let arm = RobotArm::new(Position::new(0.0, 0.0, 0.0));
        let json = serde_json::to_string(&arm).unwrap();
        let back: RobotArm = serde_json::from_str(&json).unwrap();
        assert_eq!(arm, back);
    }
}
