//! Execution records: the append-only log a protocol run produces.

use crate::core::TransferError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Record of one attempted transfer.
///
/// Records are immutable values appended in execution order; a failed
/// record carries the typed error that stopped the run.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Plate the step concerned.
    pub plate_id: String,
    /// Device the plate was taken from (or the processing device).
    pub from_device: String,
    /// Device the plate was headed to (or the processing device).
    pub to_device: String,
    /// When the step started.
    pub started_at: DateTime<Utc>,
    /// When the step finished or failed.
    pub finished_at: DateTime<Utc>,
    /// The error that failed the step, if any.
    pub error: Option<TransferError>,
}

impl TransferRecord {
    /// Whether the recorded step completed successfully.
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// How a run ended.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Every step executed.
    Completed,
    /// Execution stopped at `step` (0-based) with the given error; no
    /// later step was attempted.
    Aborted { step: usize, error: TransferError },
}

impl RunOutcome {
    /// Whether the run completed all steps.
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Summary of one protocol run: the ordered record log plus movement
/// statistics, as plain data for a renderer to format.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id of this run.
    pub run_id: Uuid,
    /// Workcell the protocol ran against.
    pub workcell: String,
    /// Protocol name.
    pub protocol: String,
    /// Wall-clock (or simulated-clock) start of the run.
    pub started_at: DateTime<Utc>,
    /// Wall-clock (or simulated-clock) end of the run.
    pub finished_at: DateTime<Utc>,
    /// Ordered transfer log.
    pub records: Vec<TransferRecord>,
    /// How the run ended.
    pub outcome: RunOutcome,
    /// Robot movements completed.
    pub moves: usize,
    /// Total straight-line distance the arm covered, in millimeters.
    pub distance_traveled_mm: f64,
    /// Sum of simulated travel and processing time.
    pub simulated: Duration,
}

impl RunReport {
    /// Number of successful transfers.
    pub fn successes(&self) -> usize {
        self.records.iter().filter(|r| r.success()).count()
    }

    /// Number of failed transfers.
    pub fn failures(&self) -> usize {
        self.records.len() - self.successes()
    }

    /// Fraction of recorded transfers that succeeded, in percent.
    /// Returns 100.0 for an empty log.
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            100.0
        } else {
            self.successes() as f64 / self.records.len() as f64 * 100.0
        }
    }
}
