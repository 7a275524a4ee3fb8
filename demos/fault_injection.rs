//! Fault Injection
//!
//! This demo shows fail-fast error handling: a blocker plate occupies the
//! liquid handler before the run, so the very first transfer fails with
//! `OccupiedLocation` and the protocol aborts with the failure in the
//! record log.
//!
//! Key concepts:
//! - Typed transfer errors instead of panics
//! - A failed step leaves the workcell exactly as the last successful
//!   operation left it
//! - Virtual time via `InstantClock` so the demo finishes instantly
//!
//! Run with: cargo run --example fault_injection

use workcell::config::{cell_screening, PlateSpec};
use workcell::protocol::{InstantClock, NoopObserver, ProtocolRunner, RunOutcome};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    // Sabotage the canonical layout: a blocker plate sits in the liquid
    // handler, the first transfer's destination.
    let mut config = cell_screening();
    config.plates.push(PlateSpec {
        id: "BLOCKER_PLATE_999".to_string(),
        device: "LiquidHandler".to_string(),
    });

    let (cell, protocol) = match config.build() {
        Ok(parts) => parts,
        Err(error) => {
            eprintln!("configuration error: {}", error);
            std::process::exit(1);
        }
    };

    println!("=== Fault injection: LiquidHandler pre-occupied ===\n");

    let mut runner = ProtocolRunner::new(cell);
    let report = runner.run(&protocol, &mut InstantClock::new(), &mut NoopObserver);

    for record in &report.records {
        match &record.error {
            None => println!("  ok      {} -> {}", record.from_device, record.to_device),
            Some(error) => println!(
                "  FAILED  {} -> {}: {}",
                record.from_device, record.to_device, error
            ),
        }
    }

    match &report.outcome {
        RunOutcome::Completed => println!("\nunexpected: protocol completed"),
        RunOutcome::Aborted { step, error } => {
            println!("\nprotocol aborted at step {}: {}", step + 1, error);
        }
    }

    println!(
        "{} of {} steps produced records; success rate {:.1}%",
        report.records.len(),
        protocol.len(),
        report.success_rate(),
    );

    // The screening plate is stranded in the gripper, exactly where the
    // failed place left it.
    println!(
        "gripper now holds: {}",
        runner.workcell().arm().gripped_plate().unwrap_or("nothing"),
    );
}
