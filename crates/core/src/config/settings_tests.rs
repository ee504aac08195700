// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

fn parse(content: &str) -> Result<Settings, ConfigError> {
    Settings::parse(content, Path::new("herd.toml"))
}

#[test]
fn empty_file_uses_defaults() {
    let settings = parse("").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.num_workers, 3);
    assert_eq!(settings.port, 9173);
    assert_eq!(settings.grace_period, Duration::from_secs(10));
}

#[test]
fn parses_all_keys() {
    let settings = parse(
        r#"
num_workers = 5
port = 8080
central_server = "http://coordinator:8080"
grace_period = "2s 500ms"
heartbeat_interval = "1m"
worker_binary = "bin/herd-worker"
state_dir = "state"
"#,
    )
    .unwrap();

    assert_eq!(settings.num_workers, 5);
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.central_server_url(), "http://coordinator:8080");
    assert_eq!(settings.grace_period, Duration::from_millis(2500));
    assert_eq!(settings.heartbeat_interval, Duration::from_secs(60));
    assert_eq!(settings.worker_binary, Some(PathBuf::from("bin/herd-worker")));
    assert_eq!(settings.state_dir, Some(PathBuf::from("state")));
}

#[test]
fn central_server_defaults_to_local_port() {
    let settings = parse("port = 9000").unwrap();
    assert_eq!(settings.central_server_url(), "http://localhost:9000");
}

#[parameterized(
    unknown_key = { "workers = 3" },
    negative_count = { "num_workers = -1" },
    bad_duration = { "grace_period = \"soon\"" },
    port_out_of_range = { "port = 70000" },
    not_toml = { "num_workers = " },
)]
fn rejects_invalid_settings(content: &str) {
    let err = parse(content).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }), "got {err:?}");
    assert!(err.to_string().contains("herd.toml"));
}
