//! Builder API for ergonomic context construction.
//!
//! This module provides a fluent builder for contexts and the `state_enum!`
//! macro for declaring state enums with minimal boilerplate.

pub mod context;
pub mod error;
pub mod macros;

pub use context::ContextBuilder;
pub use error::BuildError;
