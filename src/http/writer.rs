use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::http::response::{ReplyError, reason_phrase};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a reply into wire bytes.
///
/// Declared headers go out first, in the order they were recorded. When
/// the body is non-empty and no `content-length` was supplied (checked
/// case-insensitively), one is synthesized with the exact byte length.
/// For a `HEAD` request (`head = true`) the body bytes are suppressed
/// while the headers, including the synthesized length, stay as computed.
pub fn serialize_reply(
    status: u16,
    headers: &[(String, String)],
    body: &[u8],
    head: bool,
) -> Result<Vec<u8>, ReplyError> {
    let phrase = reason_phrase(status).ok_or(ReplyError::UnsupportedStatus(status))?;

    let mut buf = Vec::new();

    // Status line
    buf.extend_from_slice(format!("{} {} {}\r\n", HTTP_VERSION, status, phrase).as_bytes());

    // Headers
    let mut has_length = false;
    for (name, value) in headers {
        if name.eq_ignore_ascii_case("content-length") {
            has_length = true;
        }
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }
    if !body.is_empty() && !has_length {
        buf.extend_from_slice(format!("Content-Length: {}\r\n", body.len()).as_bytes());
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    if !head {
        buf.extend_from_slice(body);
    }

    Ok(buf)
}

pub struct ReplyWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ReplyWriter {
    pub fn new(bytes: &[u8]) -> Self {
        Self {
            buffer: bytes.to_vec(),
            written: 0,
        }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
