//! Concrete lifecycle machines.

pub mod connection;
pub mod file;

pub use connection::{Connection, ConnectionMachine, ConnectionOp, ConnectionState};
pub use file::{File, FileMachine, FileOp, FileState};
