//! Declarative workcell and protocol configuration.
//!
//! A [`WorkcellConfig`] describes a whole run as JSON: the device roster
//! with positions, the initial plate load, and the protocol to execute.
//! [`cell_screening`] provides the canonical cell line screening layout as
//! a ready-made config.

use crate::builder::{BuildError, WorkcellBuilder};
use crate::core::{Position, WorkcellState, DEFAULT_SPEED_MM_PER_S};
use crate::protocol::{Protocol, ProtocolStep};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Failure to load or assemble a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("inconsistent workcell: {0}")]
    Build(#[from] BuildError),
}

/// One device in the roster.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct DeviceSpec {
    pub name: String,
    pub position: Position,
}

/// One plate pre-loaded into a device.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct PlateSpec {
    pub id: String,
    pub device: String,
}

/// A complete run description: workcell layout plus protocol.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct WorkcellConfig {
    /// Workcell display name.
    pub name: String,
    /// Robot home (and starting) position.
    #[serde(default = "default_home")]
    pub home: Position,
    /// Arm travel speed, mm/s.
    #[serde(default = "default_speed")]
    pub speed_mm_per_s: f64,
    /// Device roster.
    pub devices: Vec<DeviceSpec>,
    /// Initial plate load.
    #[serde(default)]
    pub plates: Vec<PlateSpec>,
    /// Protocol to run.
    pub protocol: Protocol,
}

fn default_home() -> Position {
    Position::ORIGIN
}

fn default_speed() -> f64 {
    DEFAULT_SPEED_MM_PER_S
}

impl WorkcellConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Assemble the workcell and hand back the protocol to run on it.
    pub fn build(self) -> Result<(WorkcellState, Protocol), ConfigError> {
        let mut builder = WorkcellBuilder::new(self.name)
            .home(self.home)
            .arm_speed(self.speed_mm_per_s);
        for device in self.devices {
            builder = builder.device(device.name, device.position);
        }
        for plate in self.plates {
            builder = builder.plate(plate.id, plate.device);
        }
        Ok((builder.build()?, self.protocol))
    }
}

/// The canonical cell line screening workcell and protocol.
///
/// Five stations around the arm, one cell culture plate starting in
/// storage, and a full screening pass: liquid handling, centrifugation,
/// thermal cycling, plate reading, then back to storage and home.
pub fn cell_screening() -> WorkcellConfig {
    let plate = "CELL_CULTURE_PLATE_001";
    let transfer = |from: &str, to: &str| ProtocolStep::Transfer {
        plate: plate.to_string(),
        from: from.to_string(),
        to: to.to_string(),
    };
    let process = |device: &str, secs: u64| ProtocolStep::Process {
        device: device.to_string(),
        plate: plate.to_string(),
        duration: Duration::from_secs(secs),
    };

    WorkcellConfig {
        name: "Cell Line Screening Workcell".to_string(),
        home: Position::ORIGIN,
        speed_mm_per_s: DEFAULT_SPEED_MM_PER_S,
        devices: vec![
            DeviceSpec {
                name: "Storage".to_string(),
                position: Position::new(100.0, 200.0, 50.0),
            },
            DeviceSpec {
                name: "LiquidHandler".to_string(),
                position: Position::new(400.0, 200.0, 100.0),
            },
            DeviceSpec {
                name: "ThermalCycler".to_string(),
                position: Position::new(700.0, 200.0, 80.0),
            },
            DeviceSpec {
                name: "PlateReader".to_string(),
                position: Position::new(1000.0, 200.0, 90.0),
            },
            DeviceSpec {
                name: "Centrifuge".to_string(),
                position: Position::new(550.0, 400.0, 75.0),
            },
        ],
        plates: vec![PlateSpec {
            id: plate.to_string(),
            device: "Storage".to_string(),
        }],
        protocol: Protocol::new(
            "Cell Line Screening",
            vec![
                transfer("Storage", "LiquidHandler"),
                process("LiquidHandler", 3),
                transfer("LiquidHandler", "Centrifuge"),
                process("Centrifuge", 2),
                transfer("Centrifuge", "ThermalCycler"),
                process("ThermalCycler", 4),
                transfer("ThermalCycler", "PlateReader"),
                process("PlateReader", 2),
                transfer("PlateReader", "Storage"),
                ProtocolStep::ReturnHome,
            ],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_config_builds_a_consistent_workcell() {
        let (cell, protocol) = cell_screening().build().unwrap();

        assert_eq!(cell.devices().count(), 5);
        assert_eq!(
            cell.device("Storage").unwrap().occupant(),
            Some("CELL_CULTURE_PLATE_001")
        );
        assert_eq!(protocol.len(), 10);
        assert!(crate::invariants::check_invariants(&cell).is_empty());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = cell_screening();
        let json = config.to_json().unwrap();
        let back = WorkcellConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let json = r#"{
            "name": "Minimal",
            "devices": [
                {"name": "Storage", "position": {"x": 100.0, "y": 0.0, "z": 0.0}}
            ],
            "protocol": {"name": "Nothing", "steps": []}
        }"#;

        let config = WorkcellConfig::from_json(json).unwrap();
        assert_eq!(config.home, Position::ORIGIN);
        assert_eq!(config.speed_mm_per_s, DEFAULT_SPEED_MM_PER_S);
        assert!(config.plates.is_empty());
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let result = WorkcellConfig::from_json("{not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn inconsistent_roster_reports_build_error() {
        let json = r#"{
            "name": "Broken",
            "devices": [
                {"name": "Storage", "position": {"x": 100.0, "y": 0.0, "z": 0.0}}
            ],
            "plates": [{"id": "P1", "device": "Incubator"}],
            "protocol": {"name": "Nothing", "steps": []}
        }"#;

        let result = WorkcellConfig::from_json(json)
            .and_then(WorkcellConfig::build);
        assert!(matches!(result, Err(ConfigError::Build(_))));
    }
}
