//! Bike-share inventory cache.
//!
//! Polls the station inventory document on a fixed interval and answers
//! every HTTP request with the latest copy.
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │               INVENTORY CACHE                │
//!                 │                                              │
//!   Upstream  ◀───┼── poller ──(every 30s)──┐                    │
//!   (JSON)        │                         ▼                    │
//!                 │                  ┌──────────────┐            │
//!                 │                  │DocumentStore │            │
//!                 │                  └──────┬───────┘            │
//!                 │                         ▼                    │
//!   Client   ─────┼─▶ http server ──▶ response (CORS, gzip) ─────┼─▶ Client
//!                 │                                              │
//!                 │  config · observability · lifecycle          │
//!                 └──────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;

use clap::Parser;
use tokio::net::TcpListener;

use inventory_cache::cli::Cli;
use inventory_cache::lifecycle::{signals, Shutdown};
use inventory_cache::observability::{logging, metrics};
use inventory_cache::{DocumentStore, HttpServer, Poller};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    logging::init(&config.observability);

    tracing::info!("inventory-cache v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.url,
        interval_secs = config.upstream.interval_secs,
        timeout_secs = config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let store = DocumentStore::new();
    let shutdown = Shutdown::new();

    let poller = Poller::new(&config.upstream, store.clone())?;
    let poller_handle = poller.spawn(shutdown.subscribe());

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            shutdown.trigger();
            let _ = poller_handle.await;
            return Err(e.into());
        }
    };

    let server = HttpServer::new(&config, store);
    let serve = server.run(listener, shutdown.subscribe());
    tokio::pin!(serve);

    let result = tokio::select! {
        res = &mut serve => res,
        _ = signals::wait_for_signal() => {
            shutdown.trigger();
            serve.await
        }
    };

    shutdown.trigger();
    if let Err(e) = poller_handle.await {
        tracing::error!(error = %e, "Poller task failed");
    }

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}
