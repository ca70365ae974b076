//! Porter - Embeddable HTTP/1.1 Server
//!
//! Core library for accepting connections, parsing requests and routing
//! them to handlers.

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
