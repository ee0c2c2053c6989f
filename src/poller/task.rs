//! Periodic refresh task.

use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;

use crate::cache::DocumentStore;
use crate::config::UpstreamConfig;
use crate::lifecycle::shutdown::recv_shutdown;
use crate::observability::metrics;
use crate::poller::fetcher::{FetchError, UpstreamClient};

/// Refreshes the [`DocumentStore`] from upstream on a fixed interval.
pub struct Poller {
    client: UpstreamClient,
    store: DocumentStore,
    interval: Duration,
}

impl Poller {
    pub fn new(config: &UpstreamConfig, store: DocumentStore) -> Result<Self, FetchError> {
        Ok(Self {
            client: UpstreamClient::new(config)?,
            store,
            interval: Duration::from_secs(config.interval_secs),
        })
    }

    /// Run one fetch cycle. On success the store holds the new body and the
    /// stored length is returned; on failure the store is left untouched.
    pub async fn poll_once(&self) -> Result<usize, FetchError> {
        let start = Instant::now();
        match self.client.fetch().await {
            Ok(body) => {
                let len = body.len();
                self.store.set(body);
                metrics::record_fetch("success", start);
                tracing::info!(
                    bytes = len,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Fetched"
                );
                Ok(len)
            }
            Err(e) => {
                metrics::record_fetch(e.kind(), start);
                tracing::warn!(
                    url = %self.client.url(),
                    error = %e,
                    stale_secs = self.store.age().map(|age| age.as_secs()),
                    "Fetch failed, keeping previous document"
                );
                Err(e)
            }
        }
    }

    /// Fetch immediately, then once per interval, until `shutdown` fires.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            url = %self.client.url(),
            interval_secs = self.interval.as_secs(),
            "Poller starting"
        );

        loop {
            tokio::select! {
                _ = self.poll_once() => {}
                _ = recv_shutdown(&mut shutdown) => break,
            }

            tokio::select! {
                _ = time::sleep(self.interval) => {}
                _ = recv_shutdown(&mut shutdown) => break,
            }
        }

        tracing::info!("Poller received shutdown signal, exiting loop");
    }

    /// Start [`run`](Self::run) on the Tokio runtime.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
