//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router: one fallback handler for every method and path
//! - Wire up middleware (request ID, tracing, timeout)
//! - Serve on a bound listener until shutdown

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Request, State},
    http::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::cache::DocumentStore;
use crate::config::{CacheConfig, ResponseOptions};
use crate::http::request::{request_id, MakeRequestUuid, X_REQUEST_ID};
use crate::http::response::document_response;
use crate::lifecycle::shutdown::recv_shutdown;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: DocumentStore,
    pub options: ResponseOptions,
}

/// HTTP server answering every request with the cached document.
pub struct HttpServer {
    router: Router,
    config: CacheConfig,
}

impl HttpServer {
    /// Create a new HTTP server reading from `store`.
    pub fn new(config: &CacheConfig, store: DocumentStore) -> Self {
        let state = AppState {
            store,
            options: config.response,
        };

        let router = Self::build_router(config, state);
        Self {
            router,
            config: config.clone(),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &CacheConfig, state: AppState) -> Router {
        Router::new()
            .fallback(serve_document)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.listener.request_timeout_secs,
                    ))),
            )
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            compression = self.config.response.compression,
            cors = self.config.response.cors,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { recv_shutdown(&mut shutdown).await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router, for driving the server without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Serve the current document, whatever was asked for.
async fn serve_document(State(state): State<AppState>, request: Request) -> Response<Body> {
    tracing::debug!(
        request_id = %request_id(&request),
        method = %request.method(),
        path = %request.uri().path(),
        "Serving document"
    );

    document_response(state.store.body(), request.headers(), state.options)
}
