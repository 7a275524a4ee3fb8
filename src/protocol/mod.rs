//! Protocol definition and execution.
//!
//! A [`Protocol`] is an ordered list of steps; the [`ProtocolRunner`]
//! executes it against a workcell, producing a [`RunReport`] with one
//! [`TransferRecord`] per attempted transfer. Time comes from a [`Clock`]
//! (wall time or virtual) and live events go to a [`ProtocolObserver`].

mod clock;
mod observer;
mod record;
mod runner;
mod step;

pub use clock::{Clock, InstantClock, WallClock};
pub use observer::{NoopObserver, ProtocolObserver};
pub use record::{RunOutcome, RunReport, TransferRecord};
pub use runner::ProtocolRunner;
pub use step::{Protocol, ProtocolStep};
