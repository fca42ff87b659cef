//! Fixed-response server setup and accept loop.
//!
//! # Responsibilities
//! - Create the Axum Router (one fallback handler, all paths identical)
//! - Serve each accepted connection through hyper's HTTP/1 connection builder,
//!   which owns the keep-alive and header-read-timeout knobs
//! - Enforce the idle keep-alive timeout via the net-layer stream wrapper
//! - Isolate per-connection errors from the listener and other connections
//! - Drain active connections on shutdown

use std::time::Duration;

use axum::extract::State;
use axum::response::Response;
use axum::Router;
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{ClosePolicy, ServerConfig};
use crate::net::connection::{ConnectionGuard, ConnectionTracker};
use crate::net::idle::IdleTimeout;
use crate::net::listener::{ConnectionPermit, Listener};
use crate::server::response::FixedResponse;
use crate::server::ServerError;

/// How long shutdown waits for in-flight connections before giving up.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// HTTP server that answers every request with the same response.
pub struct FixedResponseServer {
    router: Router,
    config: ServerConfig,
    tracker: ConnectionTracker,
}

impl FixedResponseServer {
    /// Create a new server with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let fixed = FixedResponse::new(&config.response, config.connection.close_policy)?;
        let router = Self::build_router(fixed);
        Ok(Self {
            router,
            config,
            tracker: ConnectionTracker::new(),
        })
    }

    /// Build the Axum router. A fallback handler means every path, method,
    /// and query string produces the same response.
    fn build_router(fixed: FixedResponse) -> Router {
        Router::new()
            .fallback(respond)
            .with_state(fixed)
            .layer(TraceLayer::new_for_http())
    }

    /// Connection tracker handle, for shutdown coordination and tests that
    /// observe connection reuse.
    pub fn tracker(&self) -> ConnectionTracker {
        self.tracker.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let connection = &self.config.connection;

        // Persistence requires the keep-alive policy and a non-zero idle
        // timeout; anything else closes after one exchange.
        let idle_timeout = match (connection.close_policy, connection.keep_alive_timeout_ms) {
            (ClosePolicy::KeepAlive, ms) if ms > 0 => Some(Duration::from_millis(ms)),
            _ => None,
        };
        let header_timeout = Duration::from_millis(connection.header_timeout_ms);

        tracing::info!(
            address = %addr,
            close_policy = %connection.close_policy,
            keep_alive_timeout_ms = connection.keep_alive_timeout_ms,
            header_timeout_ms = connection.header_timeout_ms,
            "Fixed-response server starting"
        );

        let service = TowerToHyperService::new(self.router.clone());

        loop {
            tokio::select! {
                _ = shutdown.recv() => {
                    tracing::info!("Server received shutdown signal, draining connections");
                    break;
                }
                accepted = listener.accept() => {
                    match accepted {
                        Ok((stream, _peer, permit)) => {
                            let guard = self.tracker.track();
                            let service = service.clone();
                            tokio::spawn(serve_connection(
                                stream,
                                service,
                                idle_timeout,
                                header_timeout,
                                permit,
                                guard,
                            ));
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Failed to accept connection");
                        }
                    }
                }
            }
        }

        if tokio::time::timeout(DRAIN_TIMEOUT, self.tracker.wait_for_idle())
            .await
            .is_err()
        {
            tracing::warn!(
                active = self.tracker.active_count(),
                "Drain timed out with connections still open"
            );
        }

        tracing::info!("Fixed-response server stopped");
        Ok(())
    }
}

/// Handler for every request the server receives.
async fn respond(State(fixed): State<FixedResponse>) -> Response {
    fixed.to_response()
}

/// Serve one connection to completion.
///
/// The permit and guard are held for the connection's lifetime; dropping them
/// releases the listener slot and decrements the active count even if hyper
/// bails out early.
async fn serve_connection(
    stream: TcpStream,
    service: TowerToHyperService<Router>,
    idle_timeout: Option<Duration>,
    header_timeout: Duration,
    _permit: ConnectionPermit,
    guard: ConnectionGuard,
) {
    let io = TokioIo::new(IdleTimeout::new(stream, idle_timeout));

    let mut builder = http1::Builder::new();
    builder
        .timer(TokioTimer::new())
        .keep_alive(idle_timeout.is_some())
        .header_read_timeout(header_timeout);

    // Malformed requests, abrupt disconnects, and idle expiry all surface
    // here and are isolated to this connection.
    if let Err(err) = builder.serve_connection(io, service).await {
        tracing::debug!(
            connection_id = %guard.id(),
            error = %err,
            "Connection ended with error"
        );
    }
}
