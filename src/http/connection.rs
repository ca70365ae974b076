use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::http::parser;
use crate::http::request::{Method, PushHandle, Request};
use crate::http::response::Outcome;
use crate::http::writer::{ReplyWriter, serialize_reply};
use crate::router::Router;

/// Cap on the request line + header section; exceeding it is a protocol
/// error, not an allocation.
const MAX_HEADER_BYTES: usize = 64 * 1024;

/// The liveness reply sent when neither a handler nor a router is
/// configured. Kept as a byte constant so the probe bytes can never drift.
pub const DEFAULT_OK: &[u8] = b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nok";

pub type HandlerFn<S> = dyn Fn(&Request, &S) -> Outcome + Send + Sync;

/// How a server instance turns a completed request into an [`Outcome`].
pub enum Dispatch<S> {
    /// Nothing configured: answer with [`DEFAULT_OK`].
    Default,
    Handler(Arc<HandlerFn<S>>),
    Router(Arc<Router<S>>),
}

impl<S> Clone for Dispatch<S> {
    fn clone(&self) -> Self {
        match self {
            Dispatch::Default => Dispatch::Default,
            Dispatch::Handler(f) => Dispatch::Handler(Arc::clone(f)),
            Dispatch::Router(r) => Dispatch::Router(Arc::clone(r)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    AwaitRequestLine,
    AwaitHeaders,
    ReadBody,
    Dispatch,
    WaitForExternalReply,
    Closed,
}

/// Inbound protocol events. Raw body bytes are not an event; the driver
/// hands them to [`RequestMachine::body_complete`] after a `ReadBody`
/// step.
#[derive(Debug)]
pub enum ProtocolEvent {
    RequestLine {
        method: Method,
        target: String,
        version: (u8, u8),
    },
    Header {
        name: String,
        value: String,
    },
    EndOfHeaders,
    /// A line that failed to parse, carried verbatim.
    ErrorLine(String),
    PeerClosed,
}

/// What the driver must do after feeding an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Feed the next event.
    Continue,
    /// Switch to raw mode and read exactly this many body bytes.
    ReadBody(usize),
    /// The request is complete; invoke the configured dispatch.
    Dispatch,
    /// Tear the connection down without a reply.
    Close,
}

/// The per-connection state machine, pure of any I/O so it can be driven
/// by synthetic events in tests.
///
/// Request fields are set exactly once on the way through; the only later
/// mutation is the method normalization in [`RequestMachine::take_request`].
#[derive(Debug)]
pub struct RequestMachine {
    state: ConnState,
    method: Option<Method>,
    path: String,
    query: String,
    version: (u8, u8),
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RequestMachine {
    pub fn new() -> Self {
        Self {
            state: ConnState::AwaitRequestLine,
            method: None,
            path: String::new(),
            query: String::new(),
            version: (0, 0),
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn on_event(&mut self, event: ProtocolEvent) -> Step {
        match (self.state, event) {
            (
                ConnState::AwaitRequestLine,
                ProtocolEvent::RequestLine {
                    method,
                    target,
                    version,
                },
            ) => match parser::split_target(&target) {
                Ok((path, query)) => {
                    self.method = Some(method);
                    self.path = path;
                    self.query = query;
                    self.version = version;
                    self.state = ConnState::AwaitHeaders;
                    Step::Continue
                }
                Err(_) => self.close(),
            },
            (ConnState::AwaitHeaders, ProtocolEvent::Header { name, value }) => {
                self.headers.push((name, value));
                Step::Continue
            }
            (ConnState::AwaitHeaders, ProtocolEvent::EndOfHeaders) => self.end_of_headers(),
            (_, ProtocolEvent::ErrorLine(_)) => self.close(),
            (_, ProtocolEvent::PeerClosed) => self.close(),
            // Anything else is an event the current state has no business
            // seeing; close instead of guessing.
            (_, _) => self.close(),
        }
    }

    /// Exact-case `Content-Length` lookup; see `Request::content_length`
    /// for the casing policy.
    fn end_of_headers(&mut self) -> Step {
        let declared = self
            .headers
            .iter()
            .find(|(name, _)| name.as_str() == "Content-Length")
            .map(|(_, value)| value.clone());

        match declared {
            None => {
                self.state = ConnState::Dispatch;
                Step::Dispatch
            }
            Some(value) => match parser::parse_content_length(&value) {
                Ok(n) if n > 0 => {
                    self.state = ConnState::ReadBody;
                    Step::ReadBody(n as usize)
                }
                Ok(_) => {
                    self.state = ConnState::Dispatch;
                    Step::Dispatch
                }
                Err(_) => self.close(),
            },
        }
    }

    pub fn body_complete(&mut self, body: Vec<u8>) -> Step {
        if self.state != ConnState::ReadBody {
            return self.close();
        }
        self.body = body;
        self.state = ConnState::Dispatch;
        Step::Dispatch
    }

    pub fn close(&mut self) -> Step {
        self.state = ConnState::Closed;
        Step::Close
    }

    pub fn wait_external(&mut self) {
        self.state = ConnState::WaitForExternalReply;
    }

    /// Hands out the completed request, applying the final method
    /// normalization. Only valid in the `Dispatch` state.
    pub fn take_request(&mut self, push: PushHandle) -> Option<Request> {
        if self.state != ConnState::Dispatch {
            return None;
        }
        let method = self.method.take()?.normalized();
        Some(Request {
            method,
            path: std::mem::take(&mut self.path),
            query: std::mem::take(&mut self.query),
            version: self.version,
            headers: std::mem::take(&mut self.headers),
            body: std::mem::take(&mut self.body),
            push,
        })
    }
}

impl Default for RequestMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Async driver owning one accepted socket: reads lines, feeds the state
/// machine, performs the body read, runs dispatch, writes the reply.
pub struct Connection<S> {
    stream: TcpStream,
    peer: SocketAddr,
    buf: BytesMut,
    machine: RequestMachine,
    dispatch: Dispatch<S>,
    state: Arc<S>,
    log_enabled: bool,
}

impl<S> Connection<S> {
    pub fn new(
        stream: TcpStream,
        peer: SocketAddr,
        dispatch: Dispatch<S>,
        state: Arc<S>,
        log_enabled: bool,
    ) -> Self {
        Self {
            stream,
            peer,
            buf: BytesMut::with_capacity(4096),
            machine: RequestMachine::new(),
            dispatch,
            state,
            log_enabled,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut step = loop {
            let event = self.next_event().await?;
            match self.machine.on_event(event) {
                Step::Continue => continue,
                other => break other,
            }
        };

        if let Step::ReadBody(len) = step {
            let body = self.read_exact_body(len).await?;
            step = self.machine.body_complete(body);
        }

        match step {
            Step::Dispatch => self.dispatch_request().await,
            // Closed without a reply; the socket is torn down on drop.
            _ => Ok(()),
        }
    }

    /// Reads the next line and classifies it for the current state. Lines
    /// that fail to parse become `ErrorLine` events so the machine closes
    /// the connection instead of the driver guessing.
    async fn next_event(&mut self) -> anyhow::Result<ProtocolEvent> {
        let line = match self.read_line().await? {
            Some(line) => line,
            None => return Ok(ProtocolEvent::PeerClosed),
        };

        let event = match self.machine.state() {
            ConnState::AwaitRequestLine => match parser::parse_request_line(&line) {
                Ok((method, target, version)) => ProtocolEvent::RequestLine {
                    method,
                    target,
                    version,
                },
                Err(_) => ProtocolEvent::ErrorLine(line),
            },
            _ => {
                if line.is_empty() {
                    ProtocolEvent::EndOfHeaders
                } else {
                    match parser::parse_header_line(&line) {
                        Ok((name, value)) => ProtocolEvent::Header { name, value },
                        Err(_) => ProtocolEvent::ErrorLine(line),
                    }
                }
            }
        };

        Ok(event)
    }

    /// Reads one CRLF-terminated line; `None` on end of stream.
    async fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        loop {
            if let Some(pos) = self.buf.windows(2).position(|w| w == b"\r\n") {
                let line = self.buf.split_to(pos + 2);
                let text = std::str::from_utf8(&line[..pos])
                    .map_err(|_| anyhow::anyhow!("invalid utf-8 in header section"))?;
                return Ok(Some(text.to_string()));
            }

            if self.buf.len() > MAX_HEADER_BYTES {
                anyhow::bail!("header section too large");
            }

            let n = self.stream.read_buf(&mut self.buf).await?;
            if n == 0 {
                return Ok(None);
            }
        }
    }

    /// Blocks until exactly `len` raw body bytes are available, counting
    /// whatever already sits in the buffer.
    async fn read_exact_body(&mut self, len: usize) -> anyhow::Result<Vec<u8>> {
        while self.buf.len() < len {
            let n = self
                .stream
                .read_buf(&mut self.buf)
                .await
                .map_err(|e| anyhow::anyhow!("body read failed: {}", e))?;

            if n == 0 {
                anyhow::bail!("peer closed before sending {} body bytes", len);
            }
        }

        Ok(self.buf.split_to(len).to_vec())
    }

    async fn dispatch_request(&mut self) -> anyhow::Result<()> {
        let (push, external) = PushHandle::channel();
        let Some(request) = self.machine.take_request(push) else {
            self.machine.close();
            return Ok(());
        };

        let dispatch = self.dispatch.clone();
        let outcome = match &dispatch {
            Dispatch::Default => {
                self.send_raw(DEFAULT_OK).await;
                self.machine.close();
                return Ok(());
            }
            Dispatch::Handler(f) => f(&request, self.state.as_ref()),
            Dispatch::Router(router) => router
                .dispatch(&request, self.state.as_ref())
                .unwrap_or_else(|| Outcome::reply(404, "404 Not Found")),
        };

        match outcome {
            Outcome::Reply {
                status,
                headers,
                body,
            } => {
                let head = request.method == Method::Head;
                let bytes = serialize_reply(status, &headers, &body, head)?;
                self.send_raw(&bytes).await;

                if self.log_enabled {
                    info!(
                        peer = %self.peer,
                        method = request.method.as_str(),
                        path = %request.path,
                        status,
                        "request served"
                    );
                }
            }
            Outcome::NoReplyClose => {
                if self.log_enabled {
                    debug!(peer = %self.peer, "closed without reply");
                }
            }
            Outcome::NoCloseWait => {
                self.machine.wait_external();
                if self.log_enabled {
                    debug!(peer = %self.peer, "waiting for external reply");
                }
                // Exactly one push ever arrives; a dropped handle just
                // ends the wait.
                if let Ok(payload) = external.await {
                    self.send_raw(&payload).await;
                }
            }
        }

        self.machine.close();
        Ok(())
    }

    /// A failed write means the peer is already gone: the connection is
    /// marked closed and nothing is raised to the caller.
    async fn send_raw(&mut self, bytes: &[u8]) {
        let mut writer = ReplyWriter::new(bytes);
        if let Err(e) = writer.write_to_stream(&mut self.stream).await {
            debug!(peer = %self.peer, error = %e, "write failed");
            self.machine.close();
        }
    }
}
