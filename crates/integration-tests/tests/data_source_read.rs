//! Data source read tests
//!
//! CommandDataSource wired to the real ShellExecutor, checked at the
//! state/diagnostic level a host would see.
#![cfg(unix)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use localexec_core::application::{cancel_channel, CancelSignal, CommandDataSource};
use localexec_core::domain::{AttributeKind, AttributePath, Severity};
use localexec_core::port::id_provider::FixedIdProvider;
use localexec_core::port::time_provider::SystemTimeProvider;
use localexec_infra_system::{SearchPathResolver, ShellExecutor};

fn data_source() -> CommandDataSource {
    let executor = ShellExecutor::new(
        Arc::new(SearchPathResolver::from_env()),
        Arc::new(SystemTimeProvider),
    );
    CommandDataSource::new(
        Arc::new(executor),
        Arc::new(FixedIdProvider("it-read".to_string())),
    )
}

#[tokio::test]
async fn test_read_echo_populates_state() {
    let resp = data_source()
        .read(json!({"command": "echo hello"}), CancelSignal::never())
        .await;

    assert!(resp.diagnostics.is_empty());
    let state = resp.state.unwrap();
    assert_eq!(state.command, "echo hello");
    assert_eq!(state.working_dir, None);
    assert_eq!(state.output.as_deref(), Some("hello\n"));
    assert_eq!(state.error.as_deref(), Some(""));
    assert_eq!(state.id.as_deref(), Some("-"));
}

#[tokio::test]
async fn test_read_ignores_computed_values_in_config() {
    let resp = data_source()
        .read(
            json!({"command": "echo fresh", "output": "stale", "id": "old"}),
            CancelSignal::never(),
        )
        .await;

    let state = resp.state.unwrap();
    assert_eq!(state.output.as_deref(), Some("fresh\n"));
    assert_eq!(state.id.as_deref(), Some("-"));
}

#[tokio::test]
async fn test_read_empty_command_is_missing_command() {
    let resp = data_source()
        .read(json!({"command": ""}), CancelSignal::never())
        .await;

    assert!(resp.state.is_none());
    assert_eq!(resp.diagnostics.len(), 1);

    let diag = &resp.diagnostics[0];
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.summary, "Missing Command");
    assert_eq!(
        diag.detail,
        "The command cannot be empty. Please specify a valid shell command."
    );
    assert_eq!(diag.attribute, Some(AttributePath::root("command")));
}

#[tokio::test]
async fn test_read_unknown_binary_is_command_not_found() {
    let resp = data_source()
        .read(
            json!({"command": "nonexistent-binary-xyz --flag"}),
            CancelSignal::never(),
        )
        .await;

    assert!(resp.state.is_none());
    let diag = &resp.diagnostics[0];
    assert_eq!(diag.summary, "Command Not Found");
    assert_eq!(
        diag.detail,
        "The command 'nonexistent-binary-xyz --flag' was not found. Ensure it's installed and accessible."
    );
}

#[tokio::test]
async fn test_read_failing_command_reports_stderr() {
    let resp = data_source()
        .read(
            json!({"command": "echo broken >&2; exit 2"}),
            CancelSignal::never(),
        )
        .await;

    assert!(resp.state.is_none());
    let diag = &resp.diagnostics[0];
    assert_eq!(diag.summary, "Command Execution Failed");
    assert_eq!(
        diag.detail,
        "Command execution failed.\n\nCommand: echo broken >&2; exit 2\nError: exit status 2\nStderr: broken\n"
    );
}

#[tokio::test]
async fn test_read_false_has_empty_stderr_in_detail() {
    let resp = data_source()
        .read(json!({"command": "false"}), CancelSignal::never())
        .await;

    let diag = &resp.diagnostics[0];
    assert_eq!(diag.summary, "Command Execution Failed");
    assert!(diag.detail.ends_with("Stderr: "));
}

#[tokio::test]
async fn test_read_respects_working_dir() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let working_dir = dir.path().to_string_lossy().into_owned();

    let resp = data_source()
        .read(
            json!({"command": "pwd -P", "working_dir": working_dir}),
            CancelSignal::never(),
        )
        .await;

    let state = resp.state.unwrap();
    assert_eq!(state.working_dir.as_deref(), Some(working_dir.as_str()));
    assert_eq!(
        state.output.unwrap(),
        format!("{}\n", canonical.display())
    );
}

#[tokio::test]
async fn test_read_missing_working_dir_fails_execution() {
    let resp = data_source()
        .read(
            json!({"command": "true", "working_dir": "/definitely/not/here"}),
            CancelSignal::never(),
        )
        .await;

    assert!(resp.state.is_none());
    assert_eq!(resp.diagnostics[0].summary, "Command Execution Failed");
}

#[tokio::test]
async fn test_read_cancelled_mid_run() {
    let ds = Arc::new(data_source());
    let (handle, signal) = cancel_channel();

    let task = {
        let ds = ds.clone();
        tokio::spawn(async move { ds.read(json!({"command": "sleep 10"}), signal).await })
    };

    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.cancel();

    let resp = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .unwrap()
        .unwrap();

    assert!(resp.state.is_none());
    let diag = &resp.diagnostics[0];
    assert_eq!(diag.summary, "Command Cancelled");
    assert_eq!(
        diag.detail,
        "Command execution was cancelled before completion.\n\nCommand: sleep 10"
    );
}

#[tokio::test]
async fn test_read_rejects_non_object_config() {
    let resp = data_source()
        .read(json!(["echo", "hello"]), CancelSignal::never())
        .await;

    assert!(resp.state.is_none());
    assert_eq!(resp.diagnostics[0].summary, "Invalid Configuration");
    assert_eq!(resp.diagnostics[0].attribute, None);
}

#[test]
fn test_schema_shape() {
    let schema = data_source().schema();

    let kinds: Vec<(&str, AttributeKind)> = schema
        .attributes
        .iter()
        .map(|a| (a.name.as_str(), a.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("command", AttributeKind::Required),
            ("working_dir", AttributeKind::Optional),
            ("output", AttributeKind::Computed),
            ("error", AttributeKind::Computed),
            ("id", AttributeKind::Computed),
        ]
    );
}
