//! Live observation of protocol execution.
//!
//! A renderer (console, test capture) implements [`ProtocolObserver`] to
//! see operations as they happen; the core stays free of formatting. All
//! methods default to no-ops so an observer implements only what it needs.

use crate::core::{ProcessOutcome, Traversal};
use crate::protocol::record::TransferRecord;
use crate::protocol::step::ProtocolStep;

/// Receives live events during a protocol run.
pub trait ProtocolObserver {
    /// A protocol step is about to execute (0-based index).
    fn on_step(&mut self, index: usize, step: &ProtocolStep) {
        let _ = (index, step);
    }

    /// The arm completed a movement.
    fn on_move(&mut self, traversal: &Traversal) {
        let _ = traversal;
    }

    /// A plate was picked out of a device.
    fn on_pick(&mut self, plate: &str, device: &str) {
        let _ = (plate, device);
    }

    /// A plate was placed into a device.
    fn on_place(&mut self, plate: &str, device: &str) {
        let _ = (plate, device);
    }

    /// A device finished processing its plate.
    fn on_process(&mut self, outcome: &ProcessOutcome) {
        let _ = outcome;
    }

    /// A transfer record was appended to the log.
    fn on_record(&mut self, record: &TransferRecord) {
        let _ = record;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl ProtocolObserver for NoopObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingObserver {
        moves: usize,
        picks: usize,
    }

    impl ProtocolObserver for CountingObserver {
        fn on_move(&mut self, _traversal: &Traversal) {
            self.moves += 1;
        }

        fn on_pick(&mut self, _plate: &str, _device: &str) {
            self.picks += 1;
        }
    }

    #[test]
    fn partial_implementations_compile_and_count() {
        use crate::core::{Position, RobotArm};

        let mut arm = RobotArm::new(Position::ORIGIN);
        let mut observer = CountingObserver::default();

        observer.on_move(&arm.move_to(Position::new(1.0, 0.0, 0.0)));
        observer.on_move(&arm.move_to(Position::ORIGIN));
        observer.on_pick("PLATE_001", "Storage");

        assert_eq!(observer.moves, 2);
        assert_eq!(observer.picks, 1);
    }
}
