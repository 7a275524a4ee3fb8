//! Workcell: a laboratory automation workcell simulator
//!
//! A workcell is a robot arm surrounded by fixed devices (storage,
//! liquid handler, centrifuge, ...) shuttling labware plates between
//! them. This crate models the whole cell as explicit state: every
//! transfer checks its preconditions before mutating anything, illegal
//! operations return typed errors, and a protocol run produces a
//! timestamped record log.
//!
//! # Core Concepts
//!
//! - **WorkcellState**: the single owner of arm, devices, and plates
//! - **Protocol**: an ordered step list (transfer, process, return home)
//! - **ProtocolRunner**: fail-fast execution producing a `RunReport`
//! - **Clock**: wall time or virtual time, chosen by the caller
//!
//! # Example
//!
//! ```rust
//! use workcell::builder::WorkcellBuilder;
//! use workcell::core::Position;
//! use workcell::protocol::{InstantClock, NoopObserver, Protocol, ProtocolRunner, ProtocolStep};
//!
//! let cell = WorkcellBuilder::new("Screening Cell")
//!     .device("Storage", Position::new(100.0, 200.0, 50.0))
//!     .device("Centrifuge", Position::new(550.0, 400.0, 75.0))
//!     .plate("CELL_CULTURE_PLATE_001", "Storage")
//!     .build()
//!     .unwrap();
//!
//! let protocol = Protocol::new(
//!     "Spin down",
//!     vec![
//!         ProtocolStep::Transfer {
//!             plate: "CELL_CULTURE_PLATE_001".to_string(),
//!             from: "Storage".to_string(),
//!             to: "Centrifuge".to_string(),
//!         },
//!         ProtocolStep::ReturnHome,
//!     ],
//! );
//!
//! let mut runner = ProtocolRunner::new(cell);
//! let report = runner.run(&protocol, &mut InstantClock::new(), &mut NoopObserver);
//!
//! assert!(report.outcome.is_completed());
//! assert_eq!(report.successes(), 1);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod invariants;
pub mod protocol;

// Re-export commonly used types
pub use crate::core::{
    Device, DeviceState, Plate, PlateLocation, Position, RobotArm, TransferError, WorkcellState,
};
pub use builder::WorkcellBuilder;
pub use protocol::{Protocol, ProtocolRunner, ProtocolStep, RunReport, TransferRecord};
