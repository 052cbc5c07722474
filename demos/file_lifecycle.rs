//! File Lifecycle
//!
//! This demo walks a file context through its whole transition table.
//!
//! Key concepts:
//! - Operations that are valid only in some states
//! - Rejections that leave the state untouched
//! - Lenient versus strict handling of already-satisfied requests
//!
//! Run with: cargo run --example file_lifecycle

use statecraft::core::{verify_total, Policy};
use statecraft::logging::{init_logging, LogConfig};
use statecraft::machines::file::{File, FileMachine};
use statecraft::template::{CsvExporter, Export, Table};
use statecraft::ContextBuilder;

fn main() {
    if let Err(err) = init_logging(&LogConfig::from_verbosity(1)) {
        eprintln!("logging disabled: {err}");
    }

    println!("=== File Lifecycle Demo ===\n");

    println!("Table check: {}", verify_total::<FileMachine>().is_success());

    let mut file = File::new();
    let mut table = Table::new(["operation", "outcome", "state"]);

    let mut record = |op: &str, outcome: String, state: &str| {
        println!("  {op:<8} -> {outcome} [{state}]");
        if let Err(err) = table.push_row([op.to_string(), outcome, state.to_string()]) {
            eprintln!("  could not record row: {err}");
        }
    };

    let outcome = |result: Result<statecraft::Step<_>, statecraft::IllegalTransition>| match result {
        Ok(step) => step.effect,
        Err(err) => format!("error: {}", err.reason()),
    };

    println!("Scenario 1: read a closed file");
    let result = file.read();
    record("read", outcome(result), file.label());

    println!("\nScenario 2: open and write");
    let result = file.open();
    record("open", outcome(result), file.label());
    let result = file.write("v1");
    record("write", outcome(result), file.label());

    println!("\nScenario 3: lock and write");
    let result = file.lock();
    record("lock", outcome(result), file.label());
    let result = file.write("v2");
    record("write", outcome(result), file.label());

    println!("\nScenario 4: unlock and close");
    let result = file.unlock();
    record("unlock", outcome(result), file.label());
    let result = file.close();
    record("close", outcome(result), file.label());
    let result = file.close();
    record("close", outcome(result), file.label());

    println!("\nStrict policy:");
    match ContextBuilder::<FileMachine>::new()
        .policy(Policy::Strict)
        .build()
    {
        Ok(mut strict) => {
            let result = strict.close();
            record("close", outcome(result), strict.label());
        }
        Err(err) => eprintln!("  could not build strict context: {err}"),
    }

    drop(record);
    println!("\nTranscript as CSV:");
    match CsvExporter::default().export(&table) {
        Ok(csv) => print!("{csv}"),
        Err(err) => eprintln!("export failed: {err}"),
    }

    println!("\n=== Demo Complete ===");
}
