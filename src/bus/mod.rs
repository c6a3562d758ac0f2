//! Message bus adapter: a NATS connection behind a synchronous facade.
//!
//! The adapter owns its own tokio runtime. Subscriptions run as tasks that
//! decode payloads and enqueue them into the shell's single inbound channel;
//! publications go through one FIFO publisher task, so a drain request is
//! only served after every publication queued before it.

mod wire;

use std::{future::Future, sync::mpsc::Sender, time::Duration};

use futures::StreamExt;
use thiserror::Error;
use tokio::{
    runtime::Runtime,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::{
    domain::events::AppEvent,
    usecases::contracts::{MessageBus, Publication},
};

/// Returns the bus module name for smoke checks.
pub fn module_name() -> &'static str {
    "bus"
}

const BUS_CONNECTED: &str = "BUS_CONNECTED";
const BUS_ASYNC_ERROR: &str = "BUS_ASYNC_ERROR";
const BUS_CONNECTION_EVENT: &str = "BUS_CONNECTION_EVENT";
const BUS_PUBLISH_FAILED: &str = "BUS_PUBLISH_FAILED";
const BUS_SUBSCRIPTION_CLOSED: &str = "BUS_SUBSCRIPTION_CLOSED";
const BUS_WORKER_THREADS: usize = 2;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("failed to start bus runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("failed to subscribe to {topic}: {source}")]
    Subscribe {
        topic: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
    #[error("failed to encode {topic} payload: {source}")]
    Encode {
        topic: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("bus connection is closed")]
    Closed,
    #[error("bus drain did not finish in time")]
    DrainTimeout,
    #[error("bus flush failed: {0}")]
    Flush(String),
}

#[derive(Debug)]
enum OutboundCommand {
    Publish {
        topic: &'static str,
        payload: Vec<u8>,
    },
    Drain(oneshot::Sender<Result<(), String>>),
}

pub struct NatsBus {
    runtime: Runtime,
    client: async_nats::Client,
    events: Sender<AppEvent>,
    outbound_tx: mpsc::UnboundedSender<OutboundCommand>,
    tasks: Vec<JoinHandle<()>>,
}

impl NatsBus {
    /// Connects to `url`. Failure here is fatal for the session.
    pub fn connect(url: &str, events: Sender<AppEvent>) -> Result<Self, BusError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(BUS_WORKER_THREADS)
            .thread_name("termchat-bus")
            .enable_all()
            .build()
            .map_err(BusError::Runtime)?;

        let error_events = events.clone();
        let client = runtime
            .block_on(
                async_nats::ConnectOptions::new()
                    .event_callback(move |event| {
                        let error_events = error_events.clone();
                        async move { report_connection_event(event, &error_events) }
                    })
                    .connect(url),
            )
            .map_err(|source| BusError::Connect {
                url: url.to_owned(),
                source: source.into(),
            })?;

        tracing::info!(code = BUS_CONNECTED, url, "connected to message bus");

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let publisher = runtime.spawn(run_publisher(client.clone(), outbound_rx, events.clone()));

        Ok(Self {
            runtime,
            client,
            events,
            outbound_tx,
            tasks: vec![publisher],
        })
    }

    /// Subscribes to `topic` and forwards every decodable payload as an event.
    pub fn subscribe(&mut self, topic: &'static str) -> Result<(), BusError> {
        let subscriber = self
            .runtime
            .block_on(self.client.subscribe(topic.to_owned()))
            .map_err(|source| BusError::Subscribe {
                topic,
                source: source.into(),
            })?;

        let task = self
            .runtime
            .spawn(forward_topic(topic, subscriber, self.events.clone()));
        self.tasks.push(task);

        tracing::debug!(topic, "subscribed to topic");
        Ok(())
    }
}

impl MessageBus for NatsBus {
    fn publish(&self, publication: &Publication) -> Result<(), BusError> {
        let topic = publication.topic();
        let payload = wire::encode(publication).map_err(|source| BusError::Encode { topic, source })?;

        self.outbound_tx
            .send(OutboundCommand::Publish { topic, payload })
            .map_err(|_| BusError::Closed)
    }

    fn drain(&mut self, timeout: Duration) -> Result<(), BusError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.outbound_tx
            .send(OutboundCommand::Drain(done_tx))
            .map_err(|_| BusError::Closed)?;

        let outcome = self
            .runtime
            .block_on(async { tokio::time::timeout(timeout, done_rx).await });

        for task in self.tasks.drain(..) {
            task.abort();
        }

        match outcome {
            Ok(Ok(Ok(()))) => {
                tracing::info!("bus drained");
                Ok(())
            }
            Ok(Ok(Err(details))) => Err(BusError::Flush(details)),
            Ok(Err(_)) => Err(BusError::Closed),
            Err(_) => Err(BusError::DrainTimeout),
        }
    }
}

impl Drop for NatsBus {
    fn drop(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl std::fmt::Debug for NatsBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsBus")
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

/// Where the publisher task writes.
trait OutboundSink: Send + Sync + 'static {
    fn send_payload(
        &self,
        topic: &'static str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), String>> + Send;

    fn flush_pending(&self) -> impl Future<Output = Result<(), String>> + Send;
}

impl OutboundSink for async_nats::Client {
    fn send_payload(
        &self,
        topic: &'static str,
        payload: Vec<u8>,
    ) -> impl Future<Output = Result<(), String>> + Send {
        let client = self.clone();
        async move {
            client
                .publish(topic.to_owned(), payload.into())
                .await
                .map_err(|error| error.to_string())
        }
    }

    fn flush_pending(&self) -> impl Future<Output = Result<(), String>> + Send {
        let client = self.clone();
        async move { client.flush().await.map_err(|error| error.to_string()) }
    }
}

async fn run_publisher<S: OutboundSink>(
    sink: S,
    mut commands: mpsc::UnboundedReceiver<OutboundCommand>,
    events: Sender<AppEvent>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            OutboundCommand::Publish { topic, payload } => {
                if let Err(error) = sink.send_payload(topic, payload).await {
                    tracing::warn!(
                        code = BUS_PUBLISH_FAILED,
                        topic,
                        error = %error,
                        "publication dropped by bus client"
                    );
                    let _ = events.send(AppEvent::InternalError(format!(
                        "publish to {topic} failed: {error}"
                    )));
                }
            }
            OutboundCommand::Drain(done) => {
                let _ = done.send(sink.flush_pending().await);
                return;
            }
        }
    }
}

async fn forward_topic(
    topic: &'static str,
    mut subscriber: async_nats::Subscriber,
    events: Sender<AppEvent>,
) {
    while let Some(message) = subscriber.next().await {
        let Some(event) = wire::decode(topic, &message.payload) else {
            continue;
        };

        if events.send(event).is_err() {
            break;
        }
    }

    tracing::debug!(code = BUS_SUBSCRIPTION_CLOSED, topic, "subscription closed");
}

fn report_connection_event(event: async_nats::Event, events: &Sender<AppEvent>) {
    let is_error = matches!(
        event,
        async_nats::Event::ServerError(_)
            | async_nats::Event::ClientError(_)
            | async_nats::Event::SlowConsumer(_)
    );

    if is_error {
        tracing::warn!(code = BUS_ASYNC_ERROR, event = %event, "async bus error");
        let _ = events.send(AppEvent::InternalError(format!("bus: {event}")));
    } else {
        tracing::info!(code = BUS_CONNECTION_EVENT, event = %event, "bus connection event");
    }
}
