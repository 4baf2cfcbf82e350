// System
use std::convert::Infallible;

// Third Party
use async_trait::async_trait;
use futures::{stream::BoxStream, StreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::{
    api::{Api, ApiResource, DynamicObject, WatchEvent, WatchParams},
    Client,
};
use tokio::time::{self, Duration};
use tracing::{debug, error, info, warn};

// Local
use crate::{error::SubscriptionError, event::PodEvent, utils::format_timestamp};

/// Wait after a failed attempt to open a watch.
pub const OPEN_RETRY_DELAY: Duration = Duration::from_secs(5);
/// Wait after an open watch stream ends.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(2);

/// The "everything" field selector. Selects every pod, same as no selector.
const EVERYTHING: &str = "";
/// Start each watch from any recent state; nothing is carried over between watches.
const ANY_RESOURCE_VERSION: &str = "0";

pub type EventStream = BoxStream<'static, Result<WatchEvent<DynamicObject>, kube::Error>>;

/// Opens pod watch subscriptions.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn subscribe(&self, namespace: &str) -> Result<EventStream, SubscriptionError>;
}

#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

pub trait Clock: Send + Sync {
    /// Current wall-clock time, formatted for log lines.
    fn timestamp(&self) -> String;
}

/// Sink for pod event log lines.
pub trait Reporter: Send + Sync {
    fn report(&self, line: &str);
}

/// Watches pods through the cluster API.
#[derive(Clone)]
pub struct PodApi {
    client: Client,
}

impl PodApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EventSource for PodApi {
    async fn subscribe(&self, namespace: &str) -> Result<EventStream, SubscriptionError> {
        // Pods are read as dynamic objects so a payload of the wrong kind is
        // dropped by classification instead of failing the stream.
        let resource = ApiResource::erase::<Pod>(&());
        let pods: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, &resource);
        let params = WatchParams::default().fields(EVERYTHING);
        let stream = pods
            .watch(&params, ANY_RESOURCE_VERSION)
            .await
            .map_err(|source| SubscriptionError::Open {
                namespace: namespace.to_string(),
                source,
            })?;
        Ok(stream.boxed())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        time::sleep(duration).await;
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        format_timestamp(&chrono::Local::now())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, line: &str) {
        info!("{}", line);
    }
}

enum WatchState {
    Connecting,
    Streaming(EventStream),
}

/// Watches the pods of one namespace forever, logging every lifecycle event and
/// reopening the watch whenever it fails or ends.
pub struct WatchLoop<S, D = TokioDelay, C = LocalClock, R = TracingReporter> {
    source: S,
    namespace: String,
    delay: D,
    clock: C,
    reporter: R,
    state: WatchState,
}

impl<S: EventSource> WatchLoop<S> {
    pub fn new(source: S, namespace: &str) -> Self {
        Self::with_parts(source, namespace, TokioDelay, LocalClock, TracingReporter)
    }
}

impl<S, D, C, R> WatchLoop<S, D, C, R>
where
    S: EventSource,
    D: Delay,
    C: Clock,
    R: Reporter,
{
    pub fn with_parts(source: S, namespace: &str, delay: D, clock: C, reporter: R) -> Self {
        Self {
            source,
            namespace: namespace.to_string(),
            delay,
            clock,
            reporter,
            state: WatchState::Connecting,
        }
    }

    #[cfg(test)]
    pub(crate) fn namespace(&self) -> &str {
        &self.namespace
    }

    #[cfg(test)]
    pub(crate) fn is_streaming(&self) -> bool {
        matches!(self.state, WatchState::Streaming(_))
    }

    /// Runs until the process is killed.
    pub async fn run(mut self) -> Infallible {
        info!("Watching pods in namespace: {}", self.namespace);
        loop {
            self.step().await;
        }
    }

    /// Advance the state machine by one transition: one open attempt while
    /// connecting, or one stream item while streaming.
    pub async fn step(&mut self) {
        let state = std::mem::replace(&mut self.state, WatchState::Connecting);
        self.state = match state {
            WatchState::Connecting => self.connect().await,
            WatchState::Streaming(stream) => self.next_event(stream).await,
        };
    }

    async fn connect(&self) -> WatchState {
        match self.source.subscribe(&self.namespace).await {
            Ok(stream) => {
                debug!("Opened pod watch in namespace {}", self.namespace);
                WatchState::Streaming(stream)
            }
            Err(e) => {
                error!("Error creating watcher: {}", e);
                self.delay.sleep(OPEN_RETRY_DELAY).await;
                WatchState::Connecting
            }
        }
    }

    async fn next_event(&self, mut stream: EventStream) -> WatchState {
        match stream.next().await {
            Some(Ok(event)) => {
                self.handle(PodEvent::classify(event));
                WatchState::Streaming(stream)
            }
            // A line that is not a decodable watch event is skipped.
            Some(Err(kube::Error::SerdeError(_))) => WatchState::Streaming(stream),
            Some(Err(e)) => {
                warn!("{}", SubscriptionError::Stream(e));
                drop(stream);
                self.reconnect().await
            }
            None => self.reconnect().await,
        }
    }

    fn handle(&self, event: PodEvent) {
        if let Some(line) = event.log_line(&self.clock.timestamp(), &self.namespace) {
            self.reporter.report(&line);
        }
    }

    async fn reconnect(&self) -> WatchState {
        info!("Watcher closed, reconnecting...");
        self.delay.sleep(RECONNECT_DELAY).await;
        WatchState::Connecting
    }
}
