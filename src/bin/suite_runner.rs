//! Sequential test-suite runner.
//!
//! Runs the hermetic suites first (`unit::` and `mock::`, no network),
//! then the live DemoQA suite (`integration::`, normally `#[ignore]`d).
//! A hermetic failure fails the run; a live failure is reported and
//! swallowed, since it usually reflects DemoQA availability rather than
//! broken test code.
//!
//! Usage: `cargo run --bin suite-runner`

use std::env;
use std::io;
use std::process::{Command, ExitCode};

/// Filters for the suites that must pass, in execution order.
const HERMETIC_SUITES: &[&str] = &["unit::", "mock::"];

/// Filter for the suite that depends on the external service.
const LIVE_SUITE: &str = "integration::";

fn cargo() -> String {
    env::var("CARGO").unwrap_or_else(|_| "cargo".to_string())
}

/// Runs one filtered slice of the `main` test target, streaming output.
fn run_suite(filter: &str, run_ignored: bool) -> io::Result<bool> {
    let mut command = Command::new(cargo());
    command.args(["test", "--test", "main", filter, "--"]);
    if run_ignored {
        command.arg("--ignored");
    }
    Ok(command.status()?.success())
}

fn main() -> ExitCode {
    println!("Running hermetic suites...");
    for filter in HERMETIC_SUITES {
        match run_suite(filter, false) {
            Ok(true) => {}
            Ok(false) => {
                eprintln!("Suite '{filter}' failed.");
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("Failed to launch cargo: {err}");
                return ExitCode::FAILURE;
            }
        }
    }
    println!("Hermetic suites passed.\n");

    println!("Running live DemoQA suite (depends on external service availability)...");
    match run_suite(LIVE_SUITE, true) {
        Ok(true) => println!("Live suite passed."),
        Ok(false) => {
            // Not a run failure: the external service regularly answers
            // 502 or times out, and the suite asserts against a shared
            // deployment we do not control.
            println!("Live suite reported failures; see output above.");
            println!("This usually reflects DemoQA service availability, not broken tests.");
        }
        Err(err) => {
            eprintln!("Failed to launch cargo: {err}");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
