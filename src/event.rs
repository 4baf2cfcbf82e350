// Third Party
use k8s_openapi::{api::core::v1::Pod, Resource};
use kube::api::{DynamicObject, WatchEvent};

/// The pod a lifecycle event refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PodRef {
    pub name: String,
    pub namespace: Option<String>,
}

impl PodRef {
    /// Returns `None` when the object is not recognizable as a named pod.
    pub fn from_object(object: DynamicObject) -> Option<Self> {
        let types = object.types.as_ref()?;
        if types.kind != Pod::KIND || types.api_version != Pod::API_VERSION {
            return None;
        }
        Some(Self {
            name: object.metadata.name?,
            namespace: object.metadata.namespace,
        })
    }
}

/// A watch event reduced to the pod lifecycle kinds that get logged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PodEvent {
    Created(PodRef),
    Updated(PodRef),
    Deleted(PodRef),
    /// Bookmarks, error statuses and payloads that are not pods.
    Other,
}

impl PodEvent {
    pub fn classify(event: WatchEvent<DynamicObject>) -> Self {
        match event {
            WatchEvent::Added(object) => {
                PodRef::from_object(object).map_or(Self::Other, Self::Created)
            }
            WatchEvent::Modified(object) => {
                PodRef::from_object(object).map_or(Self::Other, Self::Updated)
            }
            WatchEvent::Deleted(object) => {
                PodRef::from_object(object).map_or(Self::Other, Self::Deleted)
            }
            WatchEvent::Bookmark(_) | WatchEvent::Error(_) => Self::Other,
        }
    }

    pub fn action(&self) -> Option<&'static str> {
        match self {
            Self::Created(_) => Some("CREATED"),
            Self::Updated(_) => Some("UPDATED"),
            Self::Deleted(_) => Some("DELETED"),
            Self::Other => None,
        }
    }

    /// Renders the log line for this event, or `None` for events that are not logged.
    /// `watched_namespace` stands in when the pod carries no namespace of its own.
    pub fn log_line(&self, timestamp: &str, watched_namespace: &str) -> Option<String> {
        let (action, pod) = match self {
            Self::Created(pod) => ("CREATED", pod),
            Self::Updated(pod) => ("UPDATED", pod),
            Self::Deleted(pod) => ("DELETED", pod),
            Self::Other => return None,
        };
        let namespace = pod.namespace.as_deref().unwrap_or(watched_namespace);
        Some(format!(
            "[{}] Pod {}: {} in namespace {}",
            timestamp, action, pod.name, namespace
        ))
    }
}
