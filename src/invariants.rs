//! Cross-cutting consistency checks over a whole workcell.
//!
//! The operations in [`crate::core`] preserve these invariants on their
//! own; this module exists for audits at trust boundaries (after loading
//! external state, in property tests) where the history of the value is
//! unknown. Checks accumulate: the caller gets every violation at once,
//! not just the first.

use crate::core::{PlateLocation, WorkcellState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single broken consistency rule between arm, devices, and plates.
#[derive(Clone, PartialEq, Debug, Error, Serialize, Deserialize)]
pub enum InvariantViolation {
    #[error("device '{device}' claims occupant '{plate}', which does not exist")]
    OccupantNotFound { device: String, plate: String },

    #[error("device '{device}' claims occupant '{plate}', but the plate reports {location}")]
    OccupantDisagrees {
        device: String,
        plate: String,
        location: PlateLocation,
    },

    #[error("plate '{plate}' reports device '{device}', which does not exist")]
    PlateAtUnknownDevice { plate: String, device: String },

    #[error("plate '{plate}' reports device '{device}', but the device holds {occupant:?}")]
    PlateNotInOccupant {
        plate: String,
        device: String,
        occupant: Option<String>,
    },

    #[error("gripper claims plate '{plate}', which does not exist")]
    GrippedPlateNotFound { plate: String },

    #[error("gripper claims plate '{plate}', but the plate reports {location}")]
    GrippedPlateDisagrees {
        plate: String,
        location: PlateLocation,
    },

    #[error("plate '{plate}' reports the gripper, but the gripper holds {held:?}")]
    PlateNotInGripper { plate: String, held: Option<String> },

    #[error("plate '{plate}' is claimed by devices '{first}' and '{second}'")]
    DuplicateOccupant {
        plate: String,
        first: String,
        second: String,
    },
}

/// Check every consistency rule, returning all violations found.
///
/// An empty vector means the workcell is internally consistent: every
/// occupancy claim is mirrored by the plate, the gripper agrees with the
/// plate it holds, and no plate is claimed twice.
pub fn check_invariants(cell: &WorkcellState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // Device -> plate direction, plus duplicate-occupant detection.
    let mut seen: std::collections::BTreeMap<&str, &str> = std::collections::BTreeMap::new();
    for device in cell.devices() {
        let Some(occupant) = device.occupant() else {
            continue;
        };
        if let Some(first) = seen.insert(occupant, device.name()) {
            violations.push(InvariantViolation::DuplicateOccupant {
                plate: occupant.to_string(),
                first: first.to_string(),
                second: device.name().to_string(),
            });
        }
        match cell.plate(occupant) {
            None => violations.push(InvariantViolation::OccupantNotFound {
                device: device.name().to_string(),
                plate: occupant.to_string(),
            }),
            Some(plate) if !plate.is_at(device.name()) => {
                violations.push(InvariantViolation::OccupantDisagrees {
                    device: device.name().to_string(),
                    plate: occupant.to_string(),
                    location: plate.location().clone(),
                });
            }
            Some(_) => {}
        }
    }

    // Plate -> device direction.
    for plate in cell.plates() {
        match plate.location() {
            PlateLocation::AtDevice(device_name) => match cell.device(device_name) {
                None => violations.push(InvariantViolation::PlateAtUnknownDevice {
                    plate: plate.id().to_string(),
                    device: device_name.clone(),
                }),
                Some(device) if device.occupant() != Some(plate.id()) => {
                    violations.push(InvariantViolation::PlateNotInOccupant {
                        plate: plate.id().to_string(),
                        device: device_name.clone(),
                        occupant: device.occupant().map(str::to_string),
                    });
                }
                Some(_) => {}
            },
            PlateLocation::InGripper => {
                if cell.arm().gripped_plate() != Some(plate.id()) {
                    violations.push(InvariantViolation::PlateNotInGripper {
                        plate: plate.id().to_string(),
                        held: cell.arm().gripped_plate().map(str::to_string),
                    });
                }
            }
            PlateLocation::Unloaded => {}
        }
    }

    // Gripper -> plate direction.
    if let Some(held) = cell.arm().gripped_plate() {
        match cell.plate(held) {
            None => violations.push(InvariantViolation::GrippedPlateNotFound {
                plate: held.to_string(),
            }),
            Some(plate) if plate.location() != &PlateLocation::InGripper => {
                violations.push(InvariantViolation::GrippedPlateDisagrees {
                    plate: held.to_string(),
                    location: plate.location().clone(),
                });
            }
            Some(_) => {}
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::WorkcellBuilder;
    use crate::core::Position;

    fn consistent_cell() -> WorkcellState {
        WorkcellBuilder::new("Audit Cell")
            .device("Storage", Position::new(100.0, 200.0, 50.0))
            .device("Centrifuge", Position::new(550.0, 400.0, 75.0))
            .plate("PLATE_001", "Storage")
            .build()
            .unwrap()
    }

    #[test]
    fn built_workcell_is_consistent() {
        assert!(check_invariants(&consistent_cell()).is_empty());
    }

    #[test]
    fn consistency_survives_pick_and_place() {
        let mut cell = consistent_cell();

        cell.pick("Storage", "PLATE_001").unwrap();
        assert!(check_invariants(&cell).is_empty());

        cell.place("Centrifuge").unwrap();
        assert!(check_invariants(&cell).is_empty());
    }

    #[test]
    fn corrupted_state_reports_both_directions() {
        let cell = consistent_cell();
        let json = serde_json::to_string(&cell).unwrap();
        // Rewrite the plate's location without updating the device.
        let corrupted = json.replace(
            r#""location":{"AtDevice":"Storage"}"#,
            r#""location":"InGripper""#,
        );
        assert_ne!(json, corrupted);
        let cell: WorkcellState = serde_json::from_str(&corrupted).unwrap();

        let violations = check_invariants(&cell);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().any(|v| matches!(
            v,
            InvariantViolation::OccupantDisagrees { device, .. } if device == "Storage"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            InvariantViolation::PlateNotInGripper { held: None, .. }
        )));
    }

    #[test]
    fn violations_render_readable_messages() {
        let violation = InvariantViolation::OccupantNotFound {
            device: "Storage".to_string(),
            plate: "GHOST".to_string(),
        };
        assert_eq!(
            violation.to_string(),
            "device 'Storage' claims occupant 'GHOST', which does not exist"
        );
    }
}
