/// Maps a numeric status code to its wire reason phrase.
///
/// Covers the common codes between 200 and 599; anything else is a
/// configuration error surfaced as [`ReplyError::UnsupportedStatus`] by
/// the writer.
pub fn reason_phrase(status: u16) -> Option<&'static str> {
    let phrase = match status {
        200 => "OK",
        201 => "Created",
        202 => "Accepted",
        204 => "No Content",
        206 => "Partial Content",
        301 => "Moved Permanently",
        302 => "Found",
        303 => "See Other",
        304 => "Not Modified",
        307 => "Temporary Redirect",
        308 => "Permanent Redirect",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        405 => "Method Not Allowed",
        406 => "Not Acceptable",
        408 => "Request Timeout",
        409 => "Conflict",
        410 => "Gone",
        411 => "Length Required",
        413 => "Payload Too Large",
        414 => "URI Too Long",
        415 => "Unsupported Media Type",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        501 => "Not Implemented",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        504 => "Gateway Timeout",
        505 => "HTTP Version Not Supported",
        _ => return None,
    };
    Some(phrase)
}

#[derive(Debug, PartialEq, Eq)]
pub enum ReplyError {
    /// The requested status code has no entry in the reason-phrase table.
    /// A programmer error: it propagates loudly instead of sending a
    /// made-up status line.
    UnsupportedStatus(u16),
}

impl std::fmt::Display for ReplyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplyError::UnsupportedStatus(code) => {
                write!(f, "no reason phrase for status code {}", code)
            }
        }
    }
}

impl std::error::Error for ReplyError {}

/// What a handler tells the connection to do next.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Serialize and send this response, then close.
    Reply {
        status: u16,
        headers: Vec<(String, String)>,
        body: Vec<u8>,
    },
    /// Close the connection without writing anything. Distinct from an
    /// empty reply: the client sees only the disconnect.
    NoReplyClose,
    /// Keep the socket open and wait for one externally pushed payload,
    /// written verbatim when it arrives.
    NoCloseWait,
}

impl Outcome {
    /// A reply with no explicit headers; the writer synthesizes
    /// `Content-Length` when the body is non-empty.
    pub fn reply(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Outcome::Reply {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn reply_with_headers(
        status: u16,
        headers: Vec<(String, String)>,
        body: impl Into<Vec<u8>>,
    ) -> Self {
        Outcome::Reply {
            status,
            headers,
            body: body.into(),
        }
    }
}
