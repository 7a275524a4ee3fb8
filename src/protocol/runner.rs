//! The protocol runner: drives the arm through an ordered step list.
//!
//! Execution is single-threaded and synchronous: one operation at a time,
//! waiting (via the [`Clock`]) for each simulated duration before issuing
//! the next. The first illegal operation is recorded and aborts the
//! remaining protocol. No retries anywhere: every failure is a logical
//! impossibility, not a transient fault, so the correct response is to
//! stop and report.

use crate::core::{TransferError, WorkcellState};
use crate::protocol::clock::Clock;
use crate::protocol::observer::ProtocolObserver;
use crate::protocol::record::{RunOutcome, RunReport, TransferRecord};
use crate::protocol::step::{Protocol, ProtocolStep};
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Executes protocols against the workcell it owns.
///
/// # Example
///
/// ```rust
/// use workcell::builder::WorkcellBuilder;
/// use workcell::core::Position;
/// use workcell::protocol::{InstantClock, NoopObserver, Protocol, ProtocolRunner, ProtocolStep};
///
/// let cell = WorkcellBuilder::new("Mini Cell")
///     .device("Storage", Position::new(100.0, 0.0, 0.0))
///     .device("PlateReader", Position::new(500.0, 0.0, 0.0))
///     .plate("P1", "Storage")
///     .build()
///     .unwrap();
///
/// let protocol = Protocol::new(
///     "Read plate",
///     vec![
///         ProtocolStep::Transfer {
///             plate: "P1".to_string(),
///             from: "Storage".to_string(),
///             to: "PlateReader".to_string(),
///         },
///         ProtocolStep::ReturnHome,
///     ],
/// );
///
/// let mut runner = ProtocolRunner::new(cell);
/// let report = runner.run(&protocol, &mut InstantClock::new(), &mut NoopObserver);
///
/// assert!(report.outcome.is_completed());
/// assert_eq!(report.successes(), 1);
/// ```
pub struct ProtocolRunner {
    workcell: WorkcellState,
}

impl ProtocolRunner {
    /// Create a runner owning the given workcell.
    pub fn new(workcell: WorkcellState) -> Self {
        ProtocolRunner { workcell }
    }

    /// Read-only view of the workcell.
    pub fn workcell(&self) -> &WorkcellState {
        &self.workcell
    }

    /// Give the workcell back, consuming the runner.
    pub fn into_workcell(self) -> WorkcellState {
        self.workcell
    }

    /// Check every step's device and plate names against the workcell.
    ///
    /// Returns the index of the first bad step and its error. Run before
    /// executing anything so a typo cannot strand a plate mid-protocol.
    pub fn validate(&self, protocol: &Protocol) -> Result<(), (usize, TransferError)> {
        for (index, step) in protocol.steps().iter().enumerate() {
            let result = match step {
                ProtocolStep::Transfer { plate, from, to } => self
                    .require_device(from)
                    .and_then(|_| self.require_device(to))
                    .and_then(|_| self.require_plate(plate)),
                ProtocolStep::Process { device, plate, .. } => self
                    .require_device(device)
                    .and_then(|_| self.require_plate(plate)),
                ProtocolStep::ReturnHome => Ok(()),
            };
            if let Err(error) = result {
                return Err((index, error));
            }
        }
        Ok(())
    }

    /// Execute the protocol to completion or first failure.
    ///
    /// Timestamps and waiting behavior come from `clock`; live events go
    /// to `observer`. The returned [`RunReport`] carries the ordered
    /// record log and movement statistics.
    pub fn run<C: Clock, O: ProtocolObserver>(
        &mut self,
        protocol: &Protocol,
        clock: &mut C,
        observer: &mut O,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = clock.now();
        let moves_before = self.workcell.arm().moves();
        let distance_before = self.workcell.arm().distance_traveled_mm();
        info!(%run_id, protocol = protocol.name(), workcell = self.workcell.name(), "protocol run started");

        let mut records = Vec::new();
        let mut simulated = Duration::ZERO;

        let outcome = match self.validate(protocol) {
            Err((step, error)) => {
                warn!(step, %error, "protocol rejected before execution");
                RunOutcome::Aborted { step, error }
            }
            Ok(()) => self.execute(protocol, clock, observer, &mut records, &mut simulated),
        };

        let report = RunReport {
            run_id,
            workcell: self.workcell.name().to_string(),
            protocol: protocol.name().to_string(),
            started_at,
            finished_at: clock.now(),
            records,
            outcome,
            moves: self.workcell.arm().moves() - moves_before,
            distance_traveled_mm: self.workcell.arm().distance_traveled_mm() - distance_before,
            simulated,
        };
        info!(
            %run_id,
            successes = report.successes(),
            failures = report.failures(),
            completed = report.outcome.is_completed(),
            "protocol run finished"
        );
        report
    }

    fn execute<C: Clock, O: ProtocolObserver>(
        &mut self,
        protocol: &Protocol,
        clock: &mut C,
        observer: &mut O,
        records: &mut Vec<TransferRecord>,
        simulated: &mut Duration,
    ) -> RunOutcome {
        for (index, step) in protocol.steps().iter().enumerate() {
            observer.on_step(index, step);
            match step {
                ProtocolStep::Transfer { plate, from, to } => {
                    let step_started = clock.now();
                    let result = self.transfer(plate, from, to, clock, observer, simulated);
                    let record = TransferRecord {
                        plate_id: plate.clone(),
                        from_device: from.clone(),
                        to_device: to.clone(),
                        started_at: step_started,
                        finished_at: clock.now(),
                        error: result.as_ref().err().cloned(),
                    };
                    observer.on_record(&record);
                    records.push(record);
                    if let Err(error) = result {
                        warn!(plate, from, to, %error, "transfer failed; aborting protocol");
                        return RunOutcome::Aborted { step: index, error };
                    }
                    info!(plate, from, to, "transfer complete");
                }
                ProtocolStep::Process {
                    device,
                    plate,
                    duration,
                } => {
                    let step_started = clock.now();
                    if let Err(error) =
                        self.process(device, plate, *duration, clock, observer, simulated)
                    {
                        warn!(device, plate, %error, "process failed; aborting protocol");
                        let record = TransferRecord {
                            plate_id: plate.clone(),
                            from_device: device.clone(),
                            to_device: device.clone(),
                            started_at: step_started,
                            finished_at: clock.now(),
                            error: Some(error.clone()),
                        };
                        observer.on_record(&record);
                        records.push(record);
                        return RunOutcome::Aborted { step: index, error };
                    }
                }
                ProtocolStep::ReturnHome => {
                    let traversal = self.workcell.return_home();
                    observer.on_move(&traversal);
                    *simulated += traversal.duration;
                    clock.wait(traversal.duration);
                    debug!(distance_mm = traversal.distance_mm, "arm returned home");
                }
            }
        }
        RunOutcome::Completed
    }

    /// One transfer: move, pick, move, place. On failure the workcell is
    /// left exactly as the last successful operation left it.
    fn transfer<C: Clock, O: ProtocolObserver>(
        &mut self,
        plate: &str,
        from: &str,
        to: &str,
        clock: &mut C,
        observer: &mut O,
        simulated: &mut Duration,
    ) -> Result<(), TransferError> {
        let traversal = self.workcell.move_to_device(from)?;
        observer.on_move(&traversal);
        *simulated += traversal.duration;
        clock.wait(traversal.duration);

        self.workcell.pick(from, plate)?;
        observer.on_pick(plate, from);

        let traversal = self.workcell.move_to_device(to)?;
        observer.on_move(&traversal);
        *simulated += traversal.duration;
        clock.wait(traversal.duration);

        self.workcell.place(to)?;
        observer.on_place(plate, to);
        Ok(())
    }

    fn process<C: Clock, O: ProtocolObserver>(
        &mut self,
        device: &str,
        plate: &str,
        duration: Duration,
        clock: &mut C,
        observer: &mut O,
        simulated: &mut Duration,
    ) -> Result<(), TransferError> {
        let outcome = self.workcell.start_process(device, plate, duration)?;
        *simulated += duration;
        clock.wait(duration);
        self.workcell.finish_process(device)?;
        observer.on_process(&outcome);
        debug!(device, plate, ?duration, "process complete");
        Ok(())
    }

    fn require_device(&self, name: &str) -> Result<(), TransferError> {
        if self.workcell.device(name).is_some() {
            Ok(())
        } else {
            Err(TransferError::UnknownDevice {
                name: name.to_string(),
            })
        }
    }

    fn require_plate(&self, id: &str) -> Result<(), TransferError> {
        if self.workcell.plate(id).is_some() {
            Ok(())
        } else {
            Err(TransferError::UnknownPlate { id: id.to_string() })
        }
    }
}
