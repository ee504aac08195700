// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::process::FakeProcessAdapter;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

fn request(cwd: &str) -> SpawnRequest {
    SpawnRequest {
        name: "worker-0".to_string(),
        program: PathBuf::from("herd-worker"),
        args: Vec::new(),
        cwd: PathBuf::from(cwd),
        env: Vec::new(),
        log_path: None,
    }
}

#[tokio::test]
async fn traced_spawn_rejects_nonexistent_cwd() {
    let fake = FakeProcessAdapter::new();
    let traced = TracedProcessAdapter::new(fake.clone());

    let err = traced
        .spawn_detached(&request("/nonexistent/path"))
        .await
        .unwrap_err();

    assert!(
        err.to_string().contains("working directory does not exist"),
        "Expected error about working directory, got: {}",
        err
    );
    // Inner adapter never saw the call
    assert!(fake.calls().is_empty());
}

#[test]
fn traced_spawn_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedProcessAdapter::new(FakeProcessAdapter::new());
        traced.spawn_detached(&request("/tmp")).await
    });

    assert!(result.is_ok(), "spawn should succeed: {:?}", result);
    assert!(logs.contains("process.spawn"), "Logs:\n{}", logs);
    assert!(logs.contains("worker-0"), "Logs:\n{}", logs);
    assert!(logs.contains("starting"), "Logs:\n{}", logs);
    assert!(logs.contains("process spawned"), "Logs:\n{}", logs);
    assert!(logs.contains("elapsed_ms"), "Logs:\n{}", logs);
}

#[test]
fn traced_spawn_logs_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeProcessAdapter::new();
        fake.fail_spawn("worker-0");
        TracedProcessAdapter::new(fake)
            .spawn_detached(&request("/tmp"))
            .await
    });

    assert!(result.is_err());
    assert!(logs.contains("spawn failed"), "Logs:\n{}", logs);
    assert!(logs.contains("injected failure"), "Logs:\n{}", logs);
}

#[test]
fn traced_signal_to_gone_process_is_quiet() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedProcessAdapter::new(FakeProcessAdapter::new());
        traced.signal(4242, StopSignal::Terminate).await
    });

    assert!(matches!(result, Err(ProcessError::NoSuchProcess(4242))));
    assert!(logs.contains("process already gone"), "Logs:\n{}", logs);
    assert!(!logs.contains("WARN"), "Logs:\n{}", logs);
}

#[tokio::test]
async fn traced_probe_delegates() {
    let fake = FakeProcessAdapter::new();
    let traced = TracedProcessAdapter::new(fake.clone());
    let pid = traced.spawn_detached(&request("/tmp")).await.unwrap();

    assert!(traced.is_alive(pid));
    fake.set_exited(pid);
    assert!(!traced.is_alive(pid));
}
