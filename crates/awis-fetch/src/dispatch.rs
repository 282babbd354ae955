//! HTTP dispatch of signed requests.

use awis_sign::SignedRequest;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use std::pin::pin;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// How a batch of requests is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchStrategy {
    /// One request at a time, in submission order.
    Sequential,
    /// Up to [`ClientConfig::concurrency`] requests in flight.
    #[default]
    Concurrent,
}

/// Configuration for the dispatcher.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests in flight for a concurrent batch.
    pub concurrency: usize,
    /// Batch execution strategy.
    pub strategy: DispatchStrategy,
    /// Timeout for a single request.
    pub timeout: Duration,
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
    /// Deadline for a whole batch. `None` waits for every request.
    pub batch_timeout: Option<Duration>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            concurrency: 8,
            strategy: DispatchStrategy::Concurrent,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            batch_timeout: Some(Duration::from_secs(120)),
            user_agent: format!("awis/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Returns the number of requests a batch may have in flight.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        match self.strategy {
            DispatchStrategy::Sequential => 1,
            DispatchStrategy::Concurrent => self.concurrency.max(1),
        }
    }
}

/// Errors that can occur while sending a request.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The request could not be sent or its body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, usually an XML error document.
        body: String,
    },

    /// The request had not completed when the batch deadline passed.
    #[error("Batch deadline of {0:?} exceeded")]
    Deadline(Duration),
}

/// Sends signed requests and returns raw response bodies.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    client: Client,
    config: ClientConfig,
}

impl Dispatcher {
    /// Creates a new dispatcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.effective_concurrency())
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a dispatcher with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the dispatcher configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends one request, returning the response body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    pub async fn send(&self, request: &SignedRequest) -> Result<Bytes, DispatchError> {
        debug!(url = %request.url, "sending request");

        let mut builder = self.client.get(&request.url);
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "request complete");
        Ok(body)
    }

    /// Sends a batch of requests, returning one outcome per request in input order.
    ///
    /// A failed request does not stop the others. Requests complete in any
    /// order; outcomes are reassembled by request index. When
    /// [`ClientConfig::batch_timeout`] passes, requests still in flight are
    /// abandoned and their slots hold [`DispatchError::Deadline`], while
    /// requests that already finished keep their outcome.
    pub async fn send_all(
        &self,
        requests: Vec<SignedRequest>,
    ) -> Vec<Result<Bytes, DispatchError>> {
        let total = requests.len();
        let concurrency = self.config.effective_concurrency();
        let deadline = self
            .config
            .batch_timeout
            .map(|limit| (Instant::now() + limit, limit));

        let mut slots: Vec<Option<Result<Bytes, DispatchError>>> =
            std::iter::repeat_with(|| None).take(total).collect();
        let mut pending = pin!(
            stream::iter(requests.into_iter().enumerate())
                .map(|(index, request)| async move { (index, self.send(&request).await) })
                .buffer_unordered(concurrency)
        );

        loop {
            let next = match deadline {
                Some((at, limit)) => match tokio::time::timeout_at(at, pending.next()).await {
                    Ok(next) => next,
                    Err(_) => {
                        let unfinished = slots.iter().filter(|slot| slot.is_none()).count();
                        warn!(?limit, unfinished, "batch deadline exceeded");
                        break;
                    }
                },
                None => pending.next().await,
            };
            let Some((index, outcome)) = next else {
                break;
            };
            slots[index] = Some(outcome);
        }

        let limit = deadline.map(|(_, limit)| limit).unwrap_or_default();
        let outcomes: Vec<_> = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| Err(DispatchError::Deadline(limit))))
            .collect();

        let mut failed = 0;
        for (index, outcome) in outcomes.iter().enumerate() {
            if let Err(e) = outcome {
                failed += 1;
                warn!(index, error = %e, "request failed");
            }
        }
        info!(total, failed, concurrency, "batch complete");

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.concurrency, 8);
        assert_eq!(config.strategy, DispatchStrategy::Concurrent);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.batch_timeout, Some(Duration::from_secs(120)));
        assert!(config.user_agent.starts_with("awis/"));
    }

    #[test]
    fn test_effective_concurrency() {
        let mut config = ClientConfig::default();
        assert_eq!(config.effective_concurrency(), 8);

        config.strategy = DispatchStrategy::Sequential;
        assert_eq!(config.effective_concurrency(), 1);

        config.strategy = DispatchStrategy::Concurrent;
        config.concurrency = 0;
        assert_eq!(config.effective_concurrency(), 1);
    }

    #[tokio::test]
    async fn test_dispatcher_creation() {
        let dispatcher = Dispatcher::with_defaults();
        assert!(dispatcher.is_ok());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let dispatcher = Dispatcher::with_defaults().unwrap();
        let outcomes = dispatcher.send_all(Vec::new()).await;
        assert!(outcomes.is_empty());
    }
}
