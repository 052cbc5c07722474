//! Statecraft: finite-state lifecycle contexts
//!
//! A context owns exactly one current state and dispatches named operations
//! to a transition table. Every `(state, operation)` pair is defined: it
//! either performs an effect (and possibly changes state) or is rejected with
//! an [`IllegalTransition`](core::IllegalTransition).
//!
//! # Core Concepts
//!
//! - **State**: a stateless tag from a closed set, via the `State` trait
//! - **Machine**: a total transition function written as one `match`
//! - **Context**: the owner of the current state (`Context`, `SharedContext`)
//! - **Policy**: whether already-satisfied requests are notices or errors
//!
//! # Example
//!
//! ```rust
//! use statecraft::machines::file::{File, FileState};
//!
//! let mut file = File::new();
//! assert!(file.read().is_err());
//!
//! file.open().unwrap();
//! file.write("v1").unwrap();
//! file.lock().unwrap();
//! assert_eq!(file.write("v2").unwrap_err().reason(), "file locked");
//!
//! file.unlock().unwrap();
//! file.close().unwrap();
//! assert_eq!(file.state(), FileState::Closed);
//! assert_eq!(file.label(), "CLOSED");
//! ```

pub mod builder;
pub mod context;
pub mod core;
pub mod logging;
pub mod machines;
pub mod registry;
pub mod template;

// Re-export commonly used types
pub use crate::builder::{BuildError, ContextBuilder};
pub use crate::context::{Context, SharedContext};
pub use crate::core::{IllegalTransition, Machine, Operation, Policy, State, Step, Verdict};
