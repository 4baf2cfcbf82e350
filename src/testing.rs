//! Fixtures shared by the unit tests.

// Third Party
use kube::{
    api::{DynamicObject, WatchEvent},
    error::ErrorResponse,
};
use serde_json::json;

/// A raw watch event of type `kind` (`ADDED`, `MODIFIED`, `DELETED`) for a pod.
pub fn pod_event(kind: &str, name: &str, namespace: &str) -> WatchEvent<DynamicObject> {
    serde_json::from_value(json!({
        "type": kind,
        "object": {
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {
                "name": name,
                "namespace": namespace,
                "resourceVersion": "1"
            }
        }
    }))
    .unwrap()
}

/// A `kube::Error::Api` with the given status code.
pub fn api_error(code: u16, reason: &str) -> kube::Error {
    kube::Error::Api(ErrorResponse {
        status: "Failure".to_string(),
        message: format!("{} (code {})", reason, code),
        reason: reason.to_string(),
        code,
    })
}

/// A `kube::Error::SerdeError`, as produced for an undecodable watch line.
pub fn serde_error() -> kube::Error {
    let error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    kube::Error::SerdeError(error)
}
