use super::outbound::OutboundRequest;
use crate::model::{ModelDescriptor, DEFAULT_TIMEOUT};
use crate::response::remote_error;
use crate::{Error, Result};
use reqwest::Client;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry::RetryIf;
use tokio_util::sync::CancellationToken;

/// Successful (2xx) response body, ready for parsing.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Executes outbound requests over a shared connection pool.
///
/// Holds no per-call state, so one engine can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct HttpEngine {
    client: Client,
}

impl HttpEngine {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// Reuse an existing connection pool.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Runs one logical call, retrying transient failures per the
    /// descriptor's retry policy until it succeeds, fails permanently,
    /// runs out of retries, or `cancel` fires.
    pub async fn execute(
        &self,
        model: &ModelDescriptor,
        request: &OutboundRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse> {
        let policy = model.retry_policy();
        let max_attempts = policy.max_attempts();
        let attempts = AtomicU32::new(0);

        let retrying = RetryIf::spawn(
            policy.schedule(),
            || {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                self.attempt(model, request, attempt, max_attempts)
            },
            |err: &Error| {
                let retryable = err.is_retryable();
                tracing::warn!(
                    "{} attempt {}/{} failed ({}): {}",
                    model.name(),
                    attempts.load(Ordering::SeqCst),
                    max_attempts,
                    if retryable { "transient" } else { "permanent" },
                    err
                );
                retryable
            },
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("{} call cancelled", model.name());
                return Err(Error::Cancelled {
                    model: model.name().to_string(),
                });
            }
            result = retrying => result,
        };

        if let Err(e) = &result {
            tracing::error!(
                "{} call failed after {} attempt(s): {}",
                model.name(),
                attempts.load(Ordering::SeqCst),
                e
            );
        }
        result
    }

    async fn attempt(
        &self,
        model: &ModelDescriptor,
        request: &OutboundRequest,
        attempt: u32,
        max_attempts: u32,
    ) -> Result<RawResponse> {
        tracing::debug!(
            "Sending {} request to {} (attempt {}/{})",
            model.name(),
            request.url().path(),
            attempt,
            max_attempts
        );

        let response = request
            .to_reqwest(&self.client, model.timeout())?
            .send()
            .await
            .map_err(|e| Error::transport(model.name(), e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(model.name(), e))?
            .to_vec();

        if !status.is_success() {
            return Err(remote_error(model.name(), status.as_u16(), &body));
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }

    /// Fetches a generated image from its time-limited URL. Not retried.
    ///
    /// Without a `timeout` the client-wide timeout applies.
    pub async fn download(
        &self,
        model: &str,
        url: &str,
        timeout: Option<Duration>,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("{} download cancelled", model);
                Err(Error::Cancelled {
                    model: model.to_string(),
                })
            }
            result = self.fetch(model, url, timeout) => result,
        }
    }

    async fn fetch(&self, model: &str, url: &str, timeout: Option<Duration>) -> Result<Vec<u8>> {
        tracing::debug!("Downloading {} image", model);

        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::transport(model, e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::transport(model, e))?
            .to_vec();

        if !status.is_success() {
            return Err(remote_error(model, status.as_u16(), &body));
        }
        Ok(body)
    }
}
