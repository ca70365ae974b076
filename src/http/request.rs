use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

/// HTTP request methods.
///
/// Known verbs parse to their canonical variant; anything else is kept in
/// `Other` so unusual clients still reach dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Options,
    /// Any verb not listed above, as received on the wire.
    Other(String),
}

impl Method {
    /// Parses a request-line method token. Known verbs match
    /// case-insensitively; unknown tokens are preserved as-is.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_uppercase().as_str() {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            "OPTIONS" => Method::Options,
            _ => Method::Other(token.to_string()),
        }
    }

    /// Canonical lower-case form. `Other` tokens are lower-cased by
    /// [`Method::normalized`] before dispatch, not here.
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "get",
            Method::Head => "head",
            Method::Post => "post",
            Method::Put => "put",
            Method::Delete => "delete",
            Method::Options => "options",
            Method::Other(token) => token.as_str(),
        }
    }

    /// Final normalization step applied once, right before dispatch.
    pub fn normalized(self) -> Self {
        match self {
            Method::Other(token) => Method::Other(token.to_ascii_lowercase()),
            canonical => canonical,
        }
    }
}

/// Handle for delivering the one external raw reply to a connection that
/// returned `Outcome::NoCloseWait`.
///
/// Exactly one payload can ever be pushed; every later attempt, and any
/// attempt against a connection that already finished, returns `false`.
#[derive(Debug, Clone)]
pub struct PushHandle {
    tx: Arc<Mutex<Option<oneshot::Sender<Vec<u8>>>>>,
}

impl PushHandle {
    pub(crate) fn channel() -> (Self, oneshot::Receiver<Vec<u8>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// A handle not connected to any waiting connection; every push
    /// returns `false`. Useful for constructing requests by hand.
    pub fn detached() -> Self {
        Self {
            tx: Arc::new(Mutex::new(None)),
        }
    }

    /// Hands `payload` to the parked connection, to be written verbatim.
    /// Returns `false` if the slot was already used or the connection is
    /// gone; never panics.
    pub fn push(&self, payload: Vec<u8>) -> bool {
        let sender = match self.tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        match sender {
            Some(tx) => tx.send(payload).is_ok(),
            None => false,
        }
    }
}

/// A parsed HTTP request, complete once it reaches dispatch.
///
/// Headers keep arrival order and duplicates; names and values are stored
/// with the casing the client sent.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path portion of the request target, no query string.
    pub path: String,
    /// Raw query string after the first `?`, empty if absent.
    pub query: String,
    /// HTTP version as (major, minor).
    pub version: (u8, u8),
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Back-reference to the owning connection, usable only for
    /// delivering the external reply in `NoCloseWait` mode.
    pub push: PushHandle,
}

impl Request {
    /// Exact-case lookup returning the first occurrence of `name`.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, v)| v.as_str())
    }

    /// Declared body length, or 0 when missing or not a number.
    ///
    /// The lookup matches exactly `"Content-Length"`. Clients sending the
    /// header under different casing get an empty body read; this mirrors
    /// the behavior this server has always had and is a deliberate,
    /// documented policy.
    pub fn content_length(&self) -> usize {
        self.header("Content-Length")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }
}
