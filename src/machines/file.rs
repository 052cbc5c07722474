//! File lifecycle: `Closed`, `Open`, `Locked`.
//!
//! | state \ op | open   | close       | read / write | lock        | unlock |
//! |------------|--------|-------------|--------------|-------------|--------|
//! | Closed     | Open   | notice      | file closed  | file closed | notice |
//! | Open       | notice | Closed      | ok           | Locked      | notice |
//! | Locked     | notice | file locked | file locked  | notice      | Open   |
//!
//! "notice" cells are no-ops under [`Policy::Lenient`](crate::core::Policy)
//! and errors under `Policy::Strict`. Locking a closed file is always an
//! error: a file has to be open before it can be locked.

use crate::context::Context;
use crate::core::{IllegalTransition, Machine, Operation, Step, Verdict};
use crate::state_enum;

state_enum! {
    /// Lifecycle state of a file handle.
    pub enum FileState {
        Closed => "CLOSED",
        Open => "OPEN",
        Locked => "LOCKED",
    }
}

/// Operations accepted by a file context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileOp {
    Open,
    Close,
    Read,
    Write(String),
    Lock,
    Unlock,
}

impl Operation for FileOp {
    fn name(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Read => "read",
            Self::Write(_) => "write",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
        }
    }
}

/// Transition table for [`FileState`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMachine;

pub type File = Context<FileMachine>;

fn moved(to: FileState, effect: &str) -> Verdict<FileState> {
    Verdict::Move {
        to,
        effect: effect.to_string(),
    }
}

fn notice(message: &str) -> Verdict<FileState> {
    Verdict::Notice {
        message: message.to_string(),
    }
}

fn reject(reason: &str) -> Verdict<FileState> {
    Verdict::Reject {
        reason: reason.to_string(),
    }
}

impl Machine for FileMachine {
    type State = FileState;
    type Operation = FileOp;

    const NAME: &'static str = "file";

    fn initial() -> FileState {
        FileState::Closed
    }

    fn states() -> &'static [FileState] {
        FileState::ALL
    }

    fn sample_operations() -> Vec<FileOp> {
        vec![
            FileOp::Open,
            FileOp::Close,
            FileOp::Read,
            FileOp::Write("sample".to_string()),
            FileOp::Lock,
            FileOp::Unlock,
        ]
    }

    fn transition(state: FileState, operation: &FileOp) -> Verdict<FileState> {
        use FileState::{Closed, Locked, Open};

        match (state, operation) {
            (Closed, FileOp::Open) => moved(Open, "opening file"),
            (Closed, FileOp::Close) => notice("file already closed"),
            (Closed, FileOp::Read | FileOp::Write(_) | FileOp::Lock) => reject("file closed"),
            (Closed, FileOp::Unlock) => notice("file not locked"),

            (Open, FileOp::Open) => notice("file already open"),
            (Open, FileOp::Close) => moved(Closed, "closing file"),
            (Open, FileOp::Read) => Verdict::Stay {
                effect: "reading file".to_string(),
            },
            (Open, FileOp::Write(data)) => Verdict::Stay {
                effect: format!("writing {data:?} to file"),
            },
            (Open, FileOp::Lock) => moved(Locked, "locking file"),
            (Open, FileOp::Unlock) => notice("file not locked"),

            (Locked, FileOp::Open) => notice("file already open"),
            (Locked, FileOp::Close | FileOp::Read | FileOp::Write(_)) => reject("file locked"),
            (Locked, FileOp::Lock) => notice("file already locked"),
            (Locked, FileOp::Unlock) => moved(Open, "unlocking file"),
        }
    }
}

impl Context<FileMachine> {
    pub fn open(&mut self) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Open)
    }

    pub fn close(&mut self) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Close)
    }

    pub fn read(&mut self) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Read)
    }

    pub fn write(&mut self, data: impl Into<String>) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Write(data.into()))
    }

    pub fn lock(&mut self) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Lock)
    }

    pub fn unlock(&mut self) -> Result<Step<FileState>, IllegalTransition> {
        self.apply(FileOp::Unlock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ContextBuilder;
    use crate::core::{verify_total, Policy, State};

    fn strict(state: FileState) -> File {
        ContextBuilder::<FileMachine>::new()
            .initial(state)
            .policy(Policy::Strict)
            .build()
            .unwrap()
    }

    #[test]
    fn table_is_total() {
        assert!(verify_total::<FileMachine>().is_success());
    }

    #[test]
    fn read_on_closed_file_fails() {
        let mut file = File::new();
        assert_eq!(file.state(), FileState::Closed);

        let err = file.read().unwrap_err();
        assert_eq!(err.reason(), "file closed");
        assert_eq!(err.operation, "read");
        assert_eq!(file.state(), FileState::Closed);
    }

    #[test]
    fn write_on_open_file_stays_open() {
        let mut file = File::new();
        file.open().unwrap();

        let step = file.write("v1").unwrap();
        assert_eq!(step.effect, "writing \"v1\" to file");
        assert!(!step.changed());
        assert_eq!(file.state(), FileState::Open);
    }

    #[test]
    fn write_on_locked_file_fails() {
        let mut file = File::new();
        file.open().unwrap();
        file.lock().unwrap();

        let err = file.write("v2").unwrap_err();
        assert_eq!(err.reason(), "file locked");
        assert_eq!(err.state, "LOCKED");
        assert_eq!(file.state(), FileState::Locked);
    }

    #[test]
    fn unlock_then_close_ends_closed() {
        let mut file = File::with_state(FileState::Locked);

        file.unlock().unwrap();
        assert_eq!(file.state(), FileState::Open);
        file.close().unwrap();

        assert_eq!(file.label(), "CLOSED");
    }

    #[test]
    fn open_then_close_restores_original_state() {
        let mut file = File::new();
        let before = file.state();

        let opened = file.open().unwrap();
        let closed = file.close().unwrap();

        assert_eq!(file.state(), before);
        assert_eq!(opened.from, closed.to);
        assert_eq!(file.policy(), Policy::Lenient);
    }

    #[test]
    fn repeated_close_is_a_notice_both_times() {
        let mut file = File::new();

        for _ in 0..2 {
            let step = file.close().unwrap();
            assert!(step.notice);
            assert_eq!(step.effect, "file already closed");
            assert_eq!(file.state(), FileState::Closed);
        }
    }

    #[test]
    fn lock_on_closed_file_is_rejected_under_both_policies() {
        assert_eq!(File::new().lock().unwrap_err().reason(), "file closed");
        assert_eq!(
            strict(FileState::Closed).lock().unwrap_err().reason(),
            "file closed"
        );
    }

    #[test]
    fn close_on_locked_file_requires_unlock() {
        let mut file = File::with_state(FileState::Locked);

        assert_eq!(file.close().unwrap_err().reason(), "file locked");
        assert_eq!(file.state(), FileState::Locked);
    }

    #[test]
    fn strict_policy_turns_notices_into_errors() {
        let cases = [
            (FileState::Closed, FileOp::Close, "file already closed"),
            (FileState::Closed, FileOp::Unlock, "file not locked"),
            (FileState::Open, FileOp::Open, "file already open"),
            (FileState::Open, FileOp::Unlock, "file not locked"),
            (FileState::Locked, FileOp::Open, "file already open"),
            (FileState::Locked, FileOp::Lock, "file already locked"),
        ];

        for (state, op, reason) in cases {
            let mut lenient = File::with_state(state);
            assert!(lenient.apply(op.clone()).unwrap().notice);

            let mut file = strict(state);
            let err = file.apply(op).unwrap_err();
            assert_eq!(err.reason(), reason);
            assert_eq!(file.state(), state);
        }
    }

    #[test]
    fn read_and_write_only_succeed_when_open() {
        for &state in FileState::ALL {
            let mut file = File::with_state(state);
            let read = file.read();
            let write = file.write("x");

            assert_eq!(read.is_ok(), state == FileState::Open, "{}", state.label());
            assert_eq!(write.is_ok(), state == FileState::Open, "{}", state.label());
        }
    }
}
