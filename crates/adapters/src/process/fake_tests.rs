// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::path::PathBuf;

fn request(name: &str) -> SpawnRequest {
    SpawnRequest {
        name: name.to_string(),
        program: PathBuf::from("herd-worker"),
        args: Vec::new(),
        cwd: PathBuf::from("/tmp"),
        env: vec![("HERD_WORKER_ID".to_string(), "0".to_string())],
        log_path: None,
    }
}

#[tokio::test]
async fn fake_spawn_hands_out_sequential_pids() {
    let adapter = FakeProcessAdapter::new();
    let a = adapter.spawn_detached(&request("worker-0")).await.unwrap();
    let b = adapter.spawn_detached(&request("worker-1")).await.unwrap();

    assert_eq!((a, b), (1000, 1001));
    assert_eq!(adapter.alive_pids(), vec![1000, 1001]);
    assert_eq!(
        adapter.process(a).unwrap().request.env_var("HERD_WORKER_ID"),
        Some("0")
    );
}

#[tokio::test]
async fn fake_terminate_stops_process() {
    let adapter = FakeProcessAdapter::new();
    let pid = adapter.spawn_detached(&request("worker-0")).await.unwrap();

    adapter.signal(pid, StopSignal::Terminate).await.unwrap();
    assert!(!adapter.is_alive(pid));

    let err = adapter.signal(pid, StopSignal::Terminate).await.unwrap_err();
    assert!(matches!(err, ProcessError::NoSuchProcess(_)));
}

#[tokio::test]
async fn fake_ignoring_terminate_needs_kill() {
    let adapter = FakeProcessAdapter::new();
    let pid = adapter.spawn_detached(&request("worker-0")).await.unwrap();
    adapter.set_ignores_terminate(pid);

    adapter.signal(pid, StopSignal::Terminate).await.unwrap();
    assert!(adapter.is_alive(pid));

    adapter.signal(pid, StopSignal::Kill).await.unwrap();
    assert!(!adapter.is_alive(pid));
}

#[tokio::test]
async fn fake_injected_spawn_failure() {
    let adapter = FakeProcessAdapter::new();
    adapter.fail_spawn("worker-1");

    let err = adapter.spawn_detached(&request("worker-1")).await.unwrap_err();
    assert!(matches!(err, ProcessError::SpawnFailed { .. }));
    assert!(adapter.alive_pids().is_empty());

    adapter.clear_spawn_failure("worker-1");
    assert!(adapter.spawn_detached(&request("worker-1")).await.is_ok());
}

#[tokio::test]
async fn fake_records_calls() {
    let adapter = FakeProcessAdapter::new();
    let pid = adapter.spawn_detached(&request("worker-0")).await.unwrap();
    adapter.signal(pid, StopSignal::Kill).await.unwrap();
    adapter.set_foreground_exit(2);
    let code = adapter.run_foreground(&request("worker-fg")).await.unwrap();

    assert_eq!(code, Some(2));
    assert_eq!(
        adapter.calls(),
        vec![
            ProcessCall::Spawn {
                name: "worker-0".to_string()
            },
            ProcessCall::Signal {
                pid,
                signal: StopSignal::Kill
            },
            ProcessCall::RunForeground {
                name: "worker-fg".to_string()
            },
        ]
    );
}

#[tokio::test]
async fn fake_foreign_pid_is_dead_and_unsignallable() {
    let adapter = FakeProcessAdapter::new();
    let pid = adapter.spawn_detached(&request("worker-0")).await.unwrap();
    adapter.set_foreign(pid);

    assert!(!adapter.is_alive(pid));
    let err = adapter.signal(pid, StopSignal::Terminate).await.unwrap_err();
    assert!(matches!(err, ProcessError::SignalFailed { pid: p, .. } if p == pid));
    assert!(adapter.process(pid).unwrap().alive);
}
