// System
use std::process::Command;

const POD_WATCHER: &str = env!("CARGO_BIN_EXE_pod-watcher");

/// Runs the binary outside any cluster, pointed at a kubeconfig that does not exist.
fn run_without_credentials(extra_env: &[(&str, &str)]) -> std::process::Output {
    let mut command = Command::new(POD_WATCHER);
    command
        .env_remove("KUBERNETES_SERVICE_HOST")
        .env_remove("KUBERNETES_SERVICE_PORT")
        .env_remove("RUST_LOG")
        .env("KUBECONFIG", "/nonexistent/kube-pod-watcher/config")
        .env("NAMESPACE", "team-a");
    for (key, value) in extra_env {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn exits_with_logged_error_when_credentials_are_missing() {
    let output = run_without_credentials(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("Starting Kubernetes Pod Watcher..."), "stderr: {}", stderr);
    assert!(
        stderr.contains("Failed to create Kubernetes client"),
        "stderr: {}",
        stderr
    );
    assert!(
        stderr.contains("/nonexistent/kube-pod-watcher/config"),
        "stderr: {}",
        stderr
    );
    assert_eq!(stderr.matches("Failed to create Kubernetes client").count(), 1);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}

#[test]
fn honours_rust_log_on_startup() {
    let output = run_without_credentials(&[("RUST_LOG", "debug")]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {}", stderr);
    assert!(stderr.contains("Falling back to kubeconfig"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}
