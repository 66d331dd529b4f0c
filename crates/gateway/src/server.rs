//! Gateway server lifecycle: bind, serve, drain, stop.

use std::future::Future;
use std::io;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use poem::listener::TcpListener;
use poem::{
    Endpoint, EndpointExt, IntoEndpoint, IntoResponse, Middleware, Request, Response, Result,
    Server,
};

use crate::ops::Operations;
use crate::routes;

/// Maximum time in-flight requests get to complete after a shutdown signal.
/// Exceeding it force-stops the server; there is no way back to serving.
const GRACE_PERIOD: Duration = Duration::from_secs(5);

const DEFAULT_ADDRESS: &str = "0.0.0.0:8081";

/// How the server came to a stop after the shutdown signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shutdown {
    /// All in-flight requests completed before the grace period elapsed.
    Clean,
    /// The grace period elapsed with requests still in flight; remaining
    /// connections were closed.
    Forced,
}

/// The protocol-multiplexing gateway server.
///
/// Listens on the address specified by the `POSTBOX_SERVER_ADDRESS`
/// environment variable, falling back to `0.0.0.0:8081` if unset. The
/// listener accepts plain HTTP/1.1 and prior-knowledge cleartext HTTP/2 on
/// the same port; clients self-select the protocol.
pub struct GatewayServer {
    ops: Arc<Operations>,
    address: Option<String>,
}

impl Default for GatewayServer {
    fn default() -> Self {
        Self::new()
    }
}

impl GatewayServer {
    /// Creates a server with the default wiring: in-memory store, UUIDv7
    /// identifiers.
    pub fn new() -> Self {
        Self {
            ops: Arc::new(Operations::in_memory()),
            address: None,
        }
    }

    /// Overrides the listen address, taking precedence over the environment.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Binds the listener and serves until an interrupt or termination
    /// signal arrives, then drains in-flight requests within the grace
    /// period. A drain that exceeds the grace period is logged as a
    /// shutdown failure, but the call still returns.
    ///
    /// # Errors
    ///
    /// Returns an [`io::Error`] if the TCP listener fails to bind or the
    /// server encounters a fatal runtime error. A bind failure aborts
    /// startup.
    pub async fn start(self) -> io::Result<()> {
        self.start_with_shutdown(shutdown_signal()).await
    }

    /// Like [`start`](Self::start), but with a caller-supplied shutdown
    /// future in place of the process signal handlers.
    pub async fn start_with_shutdown(self, signal: impl Future<Output = ()>) -> io::Result<()> {
        let address = self.address.unwrap_or_else(|| {
            std::env::var("POSTBOX_SERVER_ADDRESS").unwrap_or_else(|_| DEFAULT_ADDRESS.to_string())
        });

        let app = routes::gateway(self.ops).await.with(RequestLog);

        tracing::info!(%address, "gateway listening");
        serve(app, address, signal, GRACE_PERIOD).await.map(|_| ())
    }
}

/// Runs the listener until `signal` resolves, then drains within `grace`.
///
/// `run_with_graceful_shutdown` reports success whether the drain completed
/// or the timeout force-closed connections, so the drain duration is
/// measured here to tell the two outcomes apart.
async fn serve<E>(
    app: E,
    address: String,
    signal: impl Future<Output = ()>,
    grace: Duration,
) -> io::Result<Shutdown>
where
    E: IntoEndpoint,
    E::Endpoint: 'static,
{
    let drain_started: Arc<OnceLock<Instant>> = Arc::new(OnceLock::new());
    let signal = {
        let drain_started = drain_started.clone();
        async move {
            signal.await;
            let _ = drain_started.set(Instant::now());
        }
    };

    Server::new(TcpListener::bind(address))
        .http2_max_concurrent_streams(None)
        .run_with_graceful_shutdown(app, signal, Some(grace))
        .await?;

    let outcome = match drain_started.get() {
        Some(started) if started.elapsed() >= grace => {
            tracing::error!(
                grace = ?grace,
                "failed to shut down cleanly: grace period elapsed with requests still in flight"
            );
            Shutdown::Forced
        }
        _ => {
            tracing::info!("server stopped");
            Shutdown::Clean
        }
    };
    Ok(outcome)
}

/// Resolves when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("SIGINT handler should install");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("SIGTERM handler should install")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {}
        _ = terminate => {}
    }

    tracing::info!("shutdown signal received, draining in-flight requests");
}

/// Logs every request with its method, path, status, and latency.
struct RequestLog;

impl<E: Endpoint> Middleware<E> for RequestLog {
    type Output = RequestLogEndpoint<E>;

    fn transform(&self, ep: E) -> Self::Output {
        RequestLogEndpoint { inner: ep }
    }
}

struct RequestLogEndpoint<E> {
    inner: E,
}

impl<E: Endpoint> Endpoint for RequestLogEndpoint<E> {
    type Output = Response;

    async fn call(&self, req: Request) -> Result<Self::Output> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let started = Instant::now();

        match self.inner.call(req).await {
            Ok(output) => {
                let response = output.into_response();
                tracing::info!(
                    %method,
                    path,
                    status = %response.status(),
                    elapsed = ?started.elapsed(),
                    "request served"
                );
                Ok(response)
            }
            Err(err) => {
                tracing::info!(
                    %method,
                    path,
                    error = %err,
                    elapsed = ?started.elapsed(),
                    "request failed"
                );
                Err(err)
            }
        }
    }
}
