pub mod deflate;

use async_tungstenite::tokio::{connect_async, ConnectStream};
use async_tungstenite::tungstenite::Message;
use async_tungstenite::WebSocketStream;
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

use crate::config::ConnectionOptions;
use crate::request::Request;
use crate::response::{InboundFrame, ResponseAssembler};
use crate::structure::GValue;
use crate::{GremlinError, GremlinResult};

type WsStream = WebSocketStream<ConnectStream>;
type WsError = async_tungstenite::tungstenite::Error;

/// The read/write half of a WebSocket connection, narrowed to what the
/// worker loop needs. Exists so tests can drive the state machine against
/// an in-memory double instead of a live socket.
#[async_trait]
trait Transport: Send {
    async fn send(&mut self, message: Message) -> Result<(), WsError>;
    async fn recv(&mut self) -> Option<Result<Message, WsError>>;
    async fn close(&mut self);
}

#[async_trait]
impl Transport for WsStream {
    async fn send(&mut self, message: Message) -> Result<(), WsError> {
        SinkExt::send(self, message).await
    }

    async fn recv(&mut self) -> Option<Result<Message, WsError>> {
        StreamExt::next(self).await
    }

    async fn close(&mut self) {
        let _ = SinkExt::close(self).await;
    }
}

/// The Connection Worker's lifecycle. `Passive` is entered and left
/// inline around a single [`Command::Query`] rather than tracked as a
/// separate loop iteration; it is still a named state because its
/// transitions are what the rest of the state machine reasons about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Init,
    Connecting,
    Active,
    Reconnecting,
    Terminated,
}

enum Command {
    Query {
        gremlin: String,
        timeout: Duration,
        reply: oneshot::Sender<GremlinResult<Vec<GValue>>>,
    },
    Shutdown,
}

/// A caller-facing, cheaply cloneable reference to a running worker.
#[derive(Clone)]
pub struct WorkerHandle {
    commands: mpsc::Sender<Command>,
    busy: Arc<AtomicBool>,
}

impl WorkerHandle {
    /// Submits `gremlin` and blocks until the Response Assembler produces
    /// a terminal outcome or `timeout` elapses.
    pub async fn query(&self, gremlin: String, timeout: Duration) -> GremlinResult<Vec<GValue>> {
        let (reply, reply_rx) = oneshot::channel();
        self.commands
            .send(Command::Query {
                gremlin,
                timeout,
                reply,
            })
            .await
            .map_err(|_| GremlinError::ConnectionUnavailable)?;

        reply_rx.await.map_err(|_| GremlinError::ConnectionUnavailable)?
    }

    pub async fn shutdown(&self) {
        let _ = self.commands.send(Command::Shutdown).await;
    }

    /// Whether this worker is in the middle of a query. The pool uses this
    /// to decide whether to burst into an overflow worker instead of
    /// queueing behind an already-busy one.
    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Spawns a worker actor that owns one WebSocket connection and runs the
/// lifecycle state machine in the background.
pub fn spawn(options: ConnectionOptions) -> WorkerHandle {
    let (tx, rx) = mpsc::channel(32);
    let busy = Arc::new(AtomicBool::new(false));
    tokio::spawn(run(options, rx, busy.clone()));
    WorkerHandle { commands: tx, busy }
}

async fn run(options: ConnectionOptions, mut commands: mpsc::Receiver<Command>, busy: Arc<AtomicBool>) {
    let mut state = State::Init;
    let mut ws: Option<Box<dyn Transport>> = None;
    let mut deflate = false;

    loop {
        state = match state {
            State::Init => {
                tracing::debug!(host = %options.host, port = options.port, "worker initializing");
                State::Connecting
            }
            State::Connecting => match connect(&options).await {
                Ok((stream, negotiated)) => {
                    tracing::debug!(deflate = negotiated, "connected");
                    ws = Some(Box::new(stream));
                    deflate = negotiated;
                    State::Active
                }
                Err(err) => {
                    tracing::warn!(error = %err, "connect failed, will retry");
                    State::Reconnecting
                }
            },
            State::Reconnecting => {
                ws = None;
                deflate = false;
                reconnect_wait(&options, &mut commands).await
            }
            State::Active => match ws.as_deref_mut() {
                Some(stream) => run_active(&options, stream, &mut commands, deflate, &busy).await,
                None => State::Reconnecting,
            },
            State::Terminated => {
                if let Some(mut stream) = ws.take() {
                    stream.close().await;
                }
                return;
            }
        };
    }
}

/// Waits out the reconnect delay while immediately failing any query
/// submitted during the wait with `CONNECTION_UNAVAILABLE`, rather
/// than leaving it queued until the next successful connect.
async fn reconnect_wait(options: &ConnectionOptions, commands: &mut mpsc::Receiver<Command>) -> State {
    let sleep = tokio::time::sleep(options.reconnect_delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return State::Connecting,
            cmd = commands.recv() => match cmd {
                Some(Command::Query { reply, .. }) => {
                    let _ = reply.send(Err(GremlinError::ConnectionUnavailable));
                }
                Some(Command::Shutdown) | None => return State::Terminated,
            },
        }
    }
}

/// Connects and negotiates permessage-deflate (RFC 7692). The client always
/// offers the extension; the returned flag reflects whether the server's
/// handshake response actually confirmed it, which is what governs whether
/// frames are compressed below.
async fn connect(options: &ConnectionOptions) -> GremlinResult<(WsStream, bool)> {
    use async_tungstenite::tungstenite::client::IntoClientRequest;

    let mut request = options.websocket_url().into_client_request()?;
    request.headers_mut().insert(
        "Sec-WebSocket-Extensions",
        "permessage-deflate".parse().expect("static header value is valid"),
    );

    let (stream, response) = connect_async(request).await?;
    let deflate = response
        .headers()
        .get("Sec-WebSocket-Extensions")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.contains("permessage-deflate"))
        .unwrap_or(false);

    Ok((stream, deflate))
}

/// Runs the Active-mode select loop: scheduled pings, asynchronously
/// delivered frames, and (inline, acting as Passive mode for the
/// duration of the call) query submissions.
async fn run_active(
    options: &ConnectionOptions,
    stream: &mut dyn Transport,
    commands: &mut mpsc::Receiver<Command>,
    deflate: bool,
    busy: &AtomicBool,
) -> State {
    let mut ping_interval = options.ping_delay.map(tokio::time::interval);

    loop {
        let ping_tick = async {
            match ping_interval.as_mut() {
                Some(interval) => {
                    interval.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            _ = ping_tick => {
                if let Err(err) = stream.send(Message::Ping(Vec::new())).await {
                    tracing::warn!(error = %err, "keep-alive ping failed");
                }
            }
            cmd = commands.recv() => {
                match cmd {
                    Some(Command::Query { gremlin, timeout, reply }) => {
                        tracing::debug!("switching to passive mode for query");
                        busy.store(true, Ordering::Release);
                        let result = run_query(stream, gremlin, timeout, deflate).await;
                        busy.store(false, Ordering::Release);
                        tracing::debug!("query finished, returning to active mode");
                        let failed = result.is_err();
                        let _ = reply.send(result);
                        if failed {
                            return State::Reconnecting;
                        }
                    }
                    Some(Command::Shutdown) | None => return State::Terminated,
                }
            }
            frame = stream.recv() => {
                match frame {
                    Some(Ok(message)) => match classify(message, deflate) {
                        Ok(InboundFrame::Ping(payload)) => {
                            let _ = stream.send(Message::Pong(payload)).await;
                        }
                        Ok(InboundFrame::Pong(_)) => {}
                        Ok(InboundFrame::Close) => return State::Reconnecting,
                        Ok(InboundFrame::Text(text)) => {
                            tracing::debug!(frame = %text, "discarding stray text frame while active");
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "failed to decode inbound frame while active");
                        }
                    },
                    Some(Err(err)) => {
                        tracing::warn!(error = %err, "transport error while active");
                        return State::Reconnecting;
                    }
                    None => return State::Reconnecting,
                }
            }
        }
    }
}

/// Sends the request frame and synchronously drains frames until the
/// Response Assembler reports a terminal outcome or the timeout elapses
/// (the Passive state).
async fn run_query(
    stream: &mut dyn Transport,
    gremlin: String,
    timeout: Duration,
    deflate: bool,
) -> GremlinResult<Vec<GValue>> {
    let request = Request::eval(gremlin);
    let request_id = request.request_id();
    let json = request.to_json()?;

    send_request_frame(stream, &json, deflate).await?;

    let mut assembler = ResponseAssembler::new(request_id);
    let deadline = tokio::time::Instant::now() + timeout;

    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        if remaining.is_zero() {
            return Err(GremlinError::Timeout);
        }

        let frame = match tokio::time::timeout(remaining, stream.recv()).await {
            Err(_) => return Err(GremlinError::Timeout),
            Ok(None) => return Err(GremlinError::Transport("connection closed".to_string())),
            Ok(Some(Err(err))) => return Err(GremlinError::from(err)),
            Ok(Some(Ok(message))) => classify(message, deflate)?,
        };

        if let InboundFrame::Ping(payload) = &frame {
            stream.send(Message::Pong(payload.clone())).await?;
        }

        if let Some(result) = assembler.process_batch(std::slice::from_ref(&frame))? {
            return Ok(result);
        }
    }
}

/// Sends a rendered request envelope as a single frame, compressing it
/// first when the connection negotiated permessage-deflate.
async fn send_request_frame(stream: &mut dyn Transport, json: &str, deflate: bool) -> GremlinResult<()> {
    if deflate {
        let compressed = self::deflate::compress(json.as_bytes())?;
        stream.send(Message::Binary(compressed)).await?;
    } else {
        stream.send(Message::Text(json.to_string())).await?;
    }
    Ok(())
}

/// Classifies one inbound WebSocket message. A `Binary` frame is only
/// meaningful when permessage-deflate is active, in which case it carries
/// a deflated response envelope that must be inflated back to text before
/// the Response Assembler can parse it.
fn classify(message: Message, deflate: bool) -> GremlinResult<InboundFrame> {
    match message {
        Message::Text(text) => Ok(InboundFrame::Text(text)),
        Message::Binary(bytes) => {
            if deflate {
                let raw = self::deflate::decompress(&bytes)?;
                let text = String::from_utf8(raw)
                    .map_err(|err| GremlinError::Transport(err.to_string()))?;
                Ok(InboundFrame::Text(text))
            } else {
                Ok(InboundFrame::Pong(Vec::new()))
            }
        }
        Message::Ping(payload) => Ok(InboundFrame::Ping(payload)),
        Message::Pong(payload) => Ok(InboundFrame::Pong(payload)),
        Message::Close(_) => Ok(InboundFrame::Close),
        // Raw-frame messages are not part of this protocol; treat them as
        // a no-op rather than misclassifying them as text.
        _ => Ok(InboundFrame::Pong(Vec::new())),
    }
}
