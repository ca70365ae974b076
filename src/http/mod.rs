//! HTTP protocol implementation.
//!
//! This module implements a minimal HTTP/1.1 server core: one request per
//! connection, dispatched to a handler or a routing table.
//!
//! # Architecture
//!
//! - **`connection`**: the per-connection state machine (`RequestMachine`)
//!   and the async driver (`Connection`) that feeds it from the socket
//! - **`parser`**: line-level parsing of request lines, headers and
//!   request targets
//! - **`request`**: request representation, methods, and the external
//!   reply handle
//! - **`response`**: status-code table and handler outcomes
//! - **`writer`**: serializes and writes replies to the client
//!
//! # Connection State Machine
//!
//! Each client connection walks a linear state machine:
//!
//! ```text
//!   ┌──────────────────┐
//!   │ AwaitRequestLine │ ← request line arrives
//!   └────────┬─────────┘
//!            ▼
//!   ┌──────────────────┐
//!   │   AwaitHeaders   │ ← headers in arrival order, until blank line
//!   └────────┬─────────┘
//!            ▼
//!   ┌──────────────────┐
//!   │     ReadBody     │ ← exactly Content-Length raw bytes
//!   └────────┬─────────┘
//!            ▼
//!   ┌──────────────────┐
//!   │     Dispatch     │ ← handler / router / fixed liveness reply
//!   └────────┬─────────┘
//!            ├─ Reply sent ──────────────► Closed
//!            ├─ NoReplyClose ────────────► Closed
//!            └─ NoCloseWait ─► WaitForExternalReply ─► Closed
//! ```
//!
//! Protocol errors, peer disconnects and unexpected events all land in
//! `Closed` without a reply; the client must reconnect.

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
