//! Shared contexts driven from many tasks at once.

use statecraft::core::Policy;
use statecraft::machines::file::{FileMachine, FileOp, FileState};
use statecraft::{ContextBuilder, SharedContext};
use std::sync::Arc;

#[tokio::test]
async fn concurrent_lock_moves_exactly_once() {
    let file = Arc::new(SharedContext::<FileMachine>::with_state(FileState::Open));

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let file = Arc::clone(&file);
            tokio::task::spawn_blocking(move || file.apply(FileOp::Lock))
        })
        .collect();

    let mut moved = 0;
    for task in tasks {
        let step = task.await.unwrap().unwrap();
        if step.changed() {
            moved += 1;
        } else {
            assert!(step.notice);
        }
    }

    assert_eq!(moved, 1);
    assert_eq!(file.state(), FileState::Locked);
}

#[tokio::test]
async fn strict_concurrent_open_has_one_winner() {
    let file = Arc::new(
        ContextBuilder::<FileMachine>::new()
            .policy(Policy::Strict)
            .build_shared()
            .unwrap(),
    );

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let file = Arc::clone(&file);
            tokio::task::spawn_blocking(move || file.apply(FileOp::Open))
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(err) => {
                assert_eq!(err.reason(), "file already open");
                rejected += 1;
            }
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 15);
    assert_eq!(file.label(), "OPEN");
}

#[tokio::test]
async fn interleaved_lifecycles_always_end_in_a_valid_state() {
    let file = Arc::new(SharedContext::<FileMachine>::new());

    let tasks: Vec<_> = (0..8)
        .map(|i| {
            let file = Arc::clone(&file);
            tokio::task::spawn_blocking(move || {
                let ops = [
                    FileOp::Open,
                    FileOp::Write(format!("task {i}")),
                    FileOp::Lock,
                    FileOp::Read,
                    FileOp::Unlock,
                    FileOp::Close,
                ];
                for op in ops {
                    // Rejections are expected when another task moved first.
                    let _ = file.apply(op);
                }
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }

    let state = file.state();
    assert!(FileState::ALL.contains(&state));

    let mut file = Arc::try_unwrap(file).unwrap().into_inner();
    if state == FileState::Locked {
        file.unlock().unwrap();
    }
    file.close().unwrap();
    assert_eq!(file.label(), "CLOSED");
}
