//! Core state machine types and logic.
//!
//! This module contains the pure part of the crate:
//! - State and operation definitions via the `State` and `Operation` traits
//! - Transition tables via the `Machine` trait
//! - Dispatch (`resolve`) and table checking (`verify_total`)
//!
//! Nothing here holds mutable state or logs; contexts do that.

mod error;
mod policy;
mod state;
mod step;
mod table;

pub use error::IllegalTransition;
pub use policy::Policy;
pub use state::{Operation, State};
pub use step::Step;
pub use table::{resolve, verify_total, Machine, TableViolation, Verdict};
