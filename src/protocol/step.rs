//! Protocol definitions: the ordered steps of one workflow run.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One step of a workcell protocol.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ProtocolStep {
    /// Move to `from`, pick `plate`, move to `to`, place.
    Transfer {
        plate: String,
        from: String,
        to: String,
    },
    /// Run a process on the plate sitting in `device`.
    Process {
        device: String,
        plate: String,
        #[serde(with = "duration_secs")]
        duration: Duration,
    },
    /// Move the arm back to the home position; no plate interaction.
    ReturnHome,
}

impl ProtocolStep {
    /// Short action name for display and logging.
    pub fn action(&self) -> &str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::Process { .. } => "process",
            Self::ReturnHome => "return_home",
        }
    }
}

/// An ordered, named list of protocol steps.
///
/// The protocol is static data: loaded once at startup and read-only to
/// the runner.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Protocol {
    name: String,
    steps: Vec<ProtocolStep>,
}

impl Protocol {
    /// Create a named protocol from an ordered step list.
    pub fn new(name: impl Into<String>, steps: Vec<ProtocolStep>) -> Self {
        Protocol {
            name: name.into(),
            steps,
        }
    }

    /// The protocol's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered steps.
    pub fn steps(&self) -> &[ProtocolStep] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the protocol has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Serialize process durations as fractional seconds in config files.
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !(secs.is_finite() && secs >= 0.0) {
            return Err(serde::de::Error::custom(format!(
                "invalid duration: {secs}"
            )));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
