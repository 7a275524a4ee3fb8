//! Labware plates and their locations.

use serde::{Deserialize, Serialize};

/// Where a plate currently is.
///
/// A plate has exactly one location at any time: inside a device, in the
/// robot's gripper, or not yet loaded into the workcell.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PlateLocation {
    /// Sitting in the named device.
    AtDevice(String),
    /// Held by the robot arm.
    InGripper,
    /// Not present anywhere in the workcell.
    Unloaded,
}

impl std::fmt::Display for PlateLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtDevice(name) => write!(f, "{}", name),
            Self::InGripper => write!(f, "gripper"),
            Self::Unloaded => write!(f, "unloaded"),
        }
    }
}

/// A labware plate: unique identity plus current location.
///
/// `relocate` is a pure data update with no validation; legality lives in
/// the robot arm and device occupancy checks, keeping a single source of
/// truth for transfer rules.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Plate {
    id: String,
    location: PlateLocation,
}

impl Plate {
    /// Create a plate sitting in the named device.
    pub fn at_device(id: impl Into<String>, device: impl Into<String>) -> Self {
        Plate {
            id: id.into(),
            location: PlateLocation::AtDevice(device.into()),
        }
    }

    /// Create a plate that is not yet in the workcell.
    pub fn unloaded(id: impl Into<String>) -> Self {
        Plate {
            id: id.into(),
            location: PlateLocation::Unloaded,
        }
    }

    /// The plate's unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The plate's current location.
    pub fn location(&self) -> &PlateLocation {
        &self.location
    }

    /// Whether the plate is currently in the named device.
    pub fn is_at(&self, device: &str) -> bool {
        matches!(&self.location, PlateLocation::AtDevice(name) if name == device)
    }

    /// Move the plate's location reference.
    ///
    /// Called only by the robot arm under its own legality checks.
    pub fn relocate(&mut self, location: PlateLocation) {
        self.location = location;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plate_starts_where_constructed() {
        let plate = Plate::at_device("PLATE_001", "Storage");
        assert_eq!(plate.id(), "PLATE_001");
        assert!(plate.is_at("Storage"));
        assert!(!plate.is_at("Centrifuge"));
    }

    #[test]
    fn unloaded_plate_is_nowhere() {
        let plate = Plate::unloaded("PLATE_001");
        assert_eq!(plate.location(), &PlateLocation::Unloaded);
        assert!(!plate.is_at("Storage"));
    }

    #[test]
    fn relocate_updates_location() {
        let mut plate = Plate::at_device("PLATE_001", "Storage");

        plate.relocate(PlateLocation::InGripper);
        assert_eq!(plate.location(), &PlateLocation::InGripper);

        plate.relocate(PlateLocation::AtDevice("Centrifuge".to_string()));
        assert!(plate.is_at("Centrifuge"));
    }

    #[test]
    fn location_displays_for_logs() {
        assert_eq!(
            format!("{}", PlateLocation::AtDevice("Storage".to_string())),
            "Storage"
        );
        assert_eq!(format!("{}", PlateLocation::InGripper), "gripper");
        assert_eq!(format!("{}", PlateLocation::Unloaded), "unloaded");
    }

    #[test]
    fn plate_serializes_correctly() {
        let plate = Plate::at_device("PLATE_001", "Storage");
        let json = serde_json::to_string(&plate).unwrap();
        let back: Plate = serde_json::from_str(&json).unwrap();
        assert_eq!(plate, back);
    }
}
