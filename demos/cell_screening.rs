//! Cell Line Screening Protocol
//!
//! This demo runs the canonical five-station screening workflow: the arm
//! carries a cell culture plate from storage through liquid handling,
//! centrifugation, thermal cycling, and plate reading, then returns it to
//! storage and parks at home.
//!
//! Key concepts:
//! - Declarative workcell setup via `WorkcellConfig`
//! - Live console rendering through a `ProtocolObserver`
//! - Wall-clock execution with a per-wait cap so long travel legs
//!   don't stall the console
//!
//! Run with: cargo run --example cell_screening

use std::io::{BufRead, Write};
use std::time::Duration;
use workcell::config::cell_screening;
use workcell::core::{ProcessOutcome, Traversal};
use workcell::protocol::{
    ProtocolObserver, ProtocolRunner, ProtocolStep, TransferRecord, WallClock,
};

/// Renders protocol events to stdout as they happen.
struct ConsoleObserver;

impl ProtocolObserver for ConsoleObserver {
    fn on_step(&mut self, index: usize, step: &ProtocolStep) {
        println!("\nSTEP {}: {}", index + 1, describe(step));
    }

    fn on_move(&mut self, traversal: &Traversal) {
        println!(
            "  arm {} -> {}  ({:.1}mm, {:.2}s)",
            traversal.from,
            traversal.to,
            traversal.distance_mm,
            traversal.duration.as_secs_f64(),
        );
    }

    fn on_pick(&mut self, plate: &str, device: &str) {
        println!("  picked {} from {}", plate, device);
    }

    fn on_place(&mut self, plate: &str, device: &str) {
        println!("  placed {} into {}", plate, device);
    }

    fn on_process(&mut self, outcome: &ProcessOutcome) {
        println!(
            "  {} processed {} for {:.0}s",
            outcome.device,
            outcome.plate,
            outcome.duration.as_secs_f64(),
        );
    }

    fn on_record(&mut self, record: &TransferRecord) {
        match &record.error {
            None => println!(
                "  logged: {} {} -> {} ok",
                record.plate_id, record.from_device, record.to_device
            ),
            Some(error) => println!("  logged: FAILED: {}", error),
        }
    }
}

fn describe(step: &ProtocolStep) -> String {
    match step {
        ProtocolStep::Transfer { plate, from, to } => {
            format!("transfer {} from {} to {}", plate, from, to)
        }
        ProtocolStep::Process { device, plate, .. } => {
            format!("process {} in {}", plate, device)
        }
        ProtocolStep::ReturnHome => "return arm to home position".to_string(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let config = cell_screening();
    let (cell, protocol) = match config.build() {
        Ok(parts) => parts,
        Err(error) => {
            eprintln!("configuration error: {}", error);
            std::process::exit(1);
        }
    };

    println!("=== {} ===", cell.name());
    println!("\nDevice roster:");
    for device in cell.devices() {
        let occupant = device.occupant().unwrap_or("empty");
        println!("  {:<14} {}  [{}]", device.name(), device.position(), occupant);
    }
    println!("\nRobot at home {}", cell.home());

    print!("\nPress Enter to start the protocol...");
    let _ = std::io::stdout().flush();
    let _ = std::io::stdin().lock().read_line(&mut String::new());

    let mut runner = ProtocolRunner::new(cell);
    // Long travel legs log their true duration but sleep at most a second.
    let mut clock = WallClock::with_cap(Duration::from_secs(1));
    let report = runner.run(&protocol, &mut clock, &mut ConsoleObserver);

    println!("\n=== Protocol Summary ===");
    println!("  run id:        {}", report.run_id);
    println!("  outcome:       {:?}", report.outcome);
    println!("  transfers:     {} ok, {} failed", report.successes(), report.failures());
    println!("  success rate:  {:.1}%", report.success_rate());
    println!("  robot moves:   {}", report.moves);
    println!("  distance:      {:.1}mm", report.distance_traveled_mm);
    println!("  simulated:     {:.2}s", report.simulated.as_secs_f64());

    println!("\nTransfer log:");
    for record in &report.records {
        let status = if record.success() { "ok" } else { "FAILED" };
        println!(
            "  {}  {:<22} {:>12} -> {:<12} {}",
            record.finished_at.format("%H:%M:%S"),
            record.plate_id,
            record.from_device,
            record.to_device,
            status,
        );
    }

    println!("\nFinal device status:");
    for device in runner.workcell().devices() {
        println!(
            "  {:<14} {:<6} [{}]",
            device.name(),
            device.state().name(),
            device.occupant().unwrap_or("empty"),
        );
    }
}
