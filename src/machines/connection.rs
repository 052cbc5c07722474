//! Database connection lifecycle: `Disconnected`, `Connected`.

use crate::context::Context;
use crate::core::{IllegalTransition, Machine, Operation, Step, Verdict};
use crate::state_enum;

state_enum! {
    pub enum ConnectionState {
        Disconnected => "DISCONNECTED",
        Connected => "CONNECTED",
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectionOp {
    Connect,
    Disconnect,
    ExecuteQuery(String),
}

impl Operation for ConnectionOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::ExecuteQuery(_) => "execute_query",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionMachine;

pub type Connection = Context<ConnectionMachine>;

impl Machine for ConnectionMachine {
    type State = ConnectionState;
    type Operation = ConnectionOp;

    const NAME: &'static str = "connection";

    fn initial() -> ConnectionState {
        ConnectionState::Disconnected
    }

    fn states() -> &'static [ConnectionState] {
        ConnectionState::ALL
    }

    fn sample_operations() -> Vec<ConnectionOp> {
        vec![
            ConnectionOp::Connect,
            ConnectionOp::Disconnect,
            ConnectionOp::ExecuteQuery("SELECT 1".to_string()),
        ]
    }

    fn transition(state: ConnectionState, operation: &ConnectionOp) -> Verdict<ConnectionState> {
        match (state, operation) {
            (ConnectionState::Disconnected, ConnectionOp::Connect) => Verdict::Move {
                to: ConnectionState::Connected,
                effect: "connecting to database".to_string(),
            },
            (ConnectionState::Disconnected, ConnectionOp::Disconnect) => Verdict::Notice {
                message: "already disconnected".to_string(),
            },
            (ConnectionState::Disconnected, ConnectionOp::ExecuteQuery(_)) => Verdict::Reject {
                reason: "not connected".to_string(),
            },
            (ConnectionState::Connected, ConnectionOp::Connect) => Verdict::Notice {
                message: "already connected".to_string(),
            },
            (ConnectionState::Connected, ConnectionOp::Disconnect) => Verdict::Move {
                to: ConnectionState::Disconnected,
                effect: "disconnecting from database".to_string(),
            },
            (ConnectionState::Connected, ConnectionOp::ExecuteQuery(sql)) => Verdict::Stay {
                effect: format!("executing query: {sql}"),
            },
        }
    }
}

impl Context<ConnectionMachine> {
    pub fn connect(&mut self) -> Result<Step<ConnectionState>, IllegalTransition> {
        self.apply(ConnectionOp::Connect)
    }

    pub fn disconnect(&mut self) -> Result<Step<ConnectionState>, IllegalTransition> {
        self.apply(ConnectionOp::Disconnect)
    }

    pub fn execute_query(
        &mut self,
        sql: impl Into<String>,
    ) -> Result<Step<ConnectionState>, IllegalTransition> {
        self.apply(ConnectionOp::ExecuteQuery(sql.into()))
    }
}
