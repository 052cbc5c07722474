//! Connection Lifecycle
//!
//! This demo configures a shared connection context from an explicitly
//! passed registry and drives it from several threads.
//!
//! Run with: cargo run --example connection_lifecycle

use statecraft::core::Policy;
use statecraft::logging::{init_logging, LogConfig};
use statecraft::machines::connection::{ConnectionMachine, ConnectionOp, ConnectionState};
use statecraft::registry::Registry;
use statecraft::{BuildError, ContextBuilder};
use std::sync::Arc;
use std::thread;

fn main() -> Result<(), BuildError> {
    if let Err(err) = init_logging(&LogConfig::default()) {
        eprintln!("logging disabled: {err}");
    }

    println!("=== Connection Lifecycle Demo ===\n");

    // One registry for the whole program, handed to whoever needs it.
    let registry = Arc::new(Registry::new());
    if let Err(err) = registry.set("connection.initial", ConnectionState::Connected) {
        eprintln!("could not store setting: {err}");
    }

    let conn = Arc::new(
        ContextBuilder::<ConnectionMachine>::new()
            .configure(&registry)?
            .build_shared()?,
    );
    println!("Initial state: {}", conn.label());

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let conn = Arc::clone(&conn);
            thread::spawn(move || conn.apply(ConnectionOp::ExecuteQuery(format!("SELECT {i}"))))
        })
        .collect();

    for worker in workers {
        match worker.join() {
            Ok(Ok(step)) => println!("  {}", step.effect),
            Ok(Err(err)) => println!("  rejected: {err}"),
            Err(_) => eprintln!("  worker panicked"),
        }
    }

    if let Err(err) = conn.apply(ConnectionOp::Disconnect) {
        eprintln!("disconnect failed: {err}");
    }
    match conn.apply(ConnectionOp::ExecuteQuery("SELECT 1".to_string())) {
        Ok(_) => println!("\nQuery after disconnect unexpectedly succeeded"),
        Err(err) => println!("\nQuery after disconnect: {}", err.reason()),
    }

    if let Err(err) = registry.set("connection.policy", Policy::Strict) {
        eprintln!("could not store setting: {err}");
    }
    let mut strict = ContextBuilder::<ConnectionMachine>::new()
        .configure(&registry)?
        .build()?;
    if let Err(err) = strict.connect() {
        println!("Strict connect while connected: {}", err.reason());
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
