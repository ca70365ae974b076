//! Server assembly: configuration, dispatch wiring and the accept loop.

pub mod listener;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::http::connection::{Dispatch, HandlerFn};
use crate::http::request::Request;
use crate::http::response::Outcome;
use crate::router::Router;

/// An embeddable HTTP/1.1 server.
///
/// With neither a handler nor a router configured it answers every
/// request with the fixed liveness reply. `S` is an arbitrary shared
/// state value handed read-only to every handler invocation.
pub struct Server<S = ()> {
    config: ServerConfig,
    handler: Option<Arc<HandlerFn<S>>>,
    router: Option<Arc<Router<S>>>,
    state: Arc<S>,
}

impl Server<()> {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            handler: None,
            router: None,
            state: Arc::new(()),
        }
    }
}

impl<S: Send + Sync + 'static> Server<S> {
    pub fn with_state(config: ServerConfig, state: S) -> Self {
        Self {
            config,
            handler: None,
            router: None,
            state: Arc::new(state),
        }
    }

    /// Installs a plain handler invoked for every request.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Request, &S) -> Outcome + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Installs a routing table. A router takes precedence over a plain
    /// handler when both are configured.
    pub fn router(mut self, router: Router<S>) -> Self {
        self.router = Some(Arc::new(router));
        self
    }

    /// The shared state value handed to handlers.
    pub fn state(&self) -> Arc<S> {
        Arc::clone(&self.state)
    }

    fn dispatch(&self) -> Dispatch<S> {
        if let Some(router) = &self.router {
            Dispatch::Router(Arc::clone(router))
        } else if let Some(handler) = &self.handler {
            Dispatch::Handler(Arc::clone(handler))
        } else {
            Dispatch::Default
        }
    }

    /// Binds the configured address and serves until the accept loop
    /// fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(self.config.listen_addr()).await?;
        self.serve(listener).await
    }

    /// Serves on an already-bound listener.
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let dispatch = self.dispatch();
        listener::run(
            listener,
            dispatch,
            Arc::clone(&self.state),
            self.config.log_enabled,
        )
        .await
    }
}
