//! kill-others: duplicate-instance terminator
//!
//! Finds every other process that is the same program run by the same user
//! and SIGKILLs it, retrying until the kernel confirms each one is gone.

use std::process::ExitCode;

use kill_others::api;
use kill_others::cli::{CliArgs, ExecutionMode};
use kill_others::error::{KillOthersError, KillOthersExitCode};
use kill_others::sweep::{KillRecord, SweepReport, Sweeper};

fn main() -> ExitCode {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    match run() {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("kill-others: {}", e);
            e.exit_code().into()
        }
    }
}

/// Main execution logic
fn run() -> Result<KillOthersExitCode, KillOthersError> {
    // Parse CLI arguments
    let args = CliArgs::parse_args();

    match args.mode() {
        ExecutionMode::ShowName => {
            println!("{}", api::get_my_process_name());
            Ok(KillOthersExitCode::Success)
        }
        ExecutionMode::Sweep { dry_run } => {
            let report = Sweeper::new().sweep(dry_run)?;
            if !args.quiet {
                print_report(&report);
            }
            if report.any_failed() {
                Ok(KillOthersExitCode::KillFailed)
            } else {
                Ok(KillOthersExitCode::Success)
            }
        }
    }
}

/// Print the sweep report
fn print_report(report: &SweepReport) {
    if report.is_empty() {
        println!("No duplicate processes found.");
        return;
    }

    println!(
        "Matched {} duplicate(s), killed {}:",
        report.total_matched, report.total_killed
    );
    for r in &report.records {
        println!("{}", record_line(r));
    }
}

/// Format one record for the report
fn record_line(record: &KillRecord) -> String {
    let status = if record.success { "✓" } else { "✗" };
    format!(
        "{} {} (PID {}): {}",
        status, record.name, record.pid, record.message
    )
}
