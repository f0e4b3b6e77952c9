//! commercetools HTTP API client
//!
//! Authenticates with the OAuth2 client credentials flow and pages through
//! resource collections with `limit`/`offset` queries.

use super::models::{PagedQueryResponse, TokenResponse};
use super::source::{ResourcePage, ResourceSource};
use crate::config::{CommercetoolsConfig, RetryConfig};
use crate::core::registry::{descriptor, SORT_ORDER};
use crate::domain::{DataExportError, ResourceType, Result, SourceError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use reqwest::{Client, ClientBuilder, Response, StatusCode};
use std::time::Duration;
use tokio::sync::Mutex;

/// Tokens are renewed this many seconds before they expire
const TOKEN_EXPIRY_MARGIN_SECONDS: i64 = 60;

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        (self.expires_at - now).num_seconds() > TOKEN_EXPIRY_MARGIN_SECONDS
    }
}

/// commercetools API client
///
/// # Example
///
/// ```no_run
/// use dataexport::adapters::commercetools::{CommercetoolsClient, ResourceSource};
/// use dataexport::config::load_config;
/// use dataexport::domain::ResourceType;
///
/// # async fn example() -> dataexport::domain::Result<()> {
/// let config = load_config("dataexport.toml")?;
/// let client = CommercetoolsClient::new(config.commercetools)?;
///
/// let page = client.fetch_page(ResourceType::Order, 0, 50).await?;
/// println!("{} records, {} pages", page.records.len(), page.total_pages);
/// # Ok(())
/// # }
/// ```
pub struct CommercetoolsClient {
    client: Client,
    config: CommercetoolsConfig,
    token: Mutex<Option<CachedToken>>,
}

impl CommercetoolsClient {
    /// Create a new client
    ///
    /// No request is made until the first page is fetched.
    pub fn new(config: CommercetoolsConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                DataExportError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self {
            client,
            config,
            token: Mutex::new(None),
        })
    }

    /// Project key the client queries
    pub fn project_key(&self) -> &str {
        &self.config.project_key
    }

    /// Request an access token and verify the API answers a minimal query
    pub async fn test_connection(&self) -> Result<()> {
        self.fetch_page(ResourceType::Order, 0, 1).await.map(|_| ())
    }

    fn basic_auth_header(&self) -> String {
        use secrecy::ExposeSecret;

        let credentials = format!(
            "{}:{}",
            self.config.client_id,
            self.config.client_secret.expose_secret()
        );
        let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
        format!("Basic {encoded}")
    }

    /// Return a valid access token, requesting a new one when needed
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.token.lock().await;
        if let Some(ref token) = *cached {
            if token.is_fresh(Utc::now()) {
                return Ok(token.access_token.clone());
            }
            tracing::debug!(expires_at = %token.expires_at, "Access token expiring, renewing");
        }

        let token = self.request_token().await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    async fn request_token(&self) -> Result<CachedToken> {
        let url = format!("{}/oauth/token", self.config.auth_url.trim_end_matches('/'));
        let scope = self.config.effective_scope();

        tracing::debug!(
            token_url = %url,
            client_id = %self.config.client_id,
            scope = %scope,
            "Requesting access token with client credentials grant"
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.basic_auth_header())
            .form(&[("grant_type", "client_credentials"), ("scope", scope.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::AuthenticationFailed(format!(
                "Token request failed with status {status}: {body}"
            ))
            .into());
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            SourceError::InvalidResponse(format!("Failed to parse token response: {e}"))
        })?;

        let expires_at = Utc::now() + chrono::Duration::seconds(token.expires_in as i64);
        tracing::info!(expires_at = %expires_at, "Acquired commercetools access token");

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at,
        })
    }

    async fn invalidate_token(&self) {
        *self.token.lock().await = None;
    }

    async fn query_page(
        &self,
        url: &str,
        offset: u64,
        limit: u64,
    ) -> Result<PagedQueryResponse> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
                ("sort", SORT_ORDER.to_string()),
                ("withTotal", "true".to_string()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
            let message = response.text().await.unwrap_or_default();
            return Err(SourceError::TokenRejected(message).into());
        }

        let response = check_status(response).await?;

        response
            .json::<PagedQueryResponse>()
            .await
            .map_err(|e| SourceError::InvalidResponse(e.to_string()).into())
    }

    /// Retry a request with exponential backoff
    ///
    /// Only transient source errors are retried.
    async fn retry_request<F, T, Fut>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let retry = &self.config.retry;
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(e) => {
                    attempt += 1;
                    if attempt >= retry.max_retries || !is_retryable(&e) {
                        return Err(e);
                    }

                    let delay_ms = backoff_delay_ms(retry, attempt);
                    crate::log_retry_attempt!(attempt, retry.max_retries, delay_ms, e);

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

#[async_trait]
impl ResourceSource for CommercetoolsClient {
    async fn fetch_page(
        &self,
        resource_type: ResourceType,
        offset: u64,
        limit: u64,
    ) -> Result<ResourcePage> {
        if limit == 0 {
            return Err(DataExportError::Validation(
                "Page limit must be greater than 0".to_string(),
            ));
        }

        let url = format!(
            "{}/{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.project_key,
            descriptor(resource_type).endpoint
        );

        tracing::debug!(
            resource_type = %resource_type,
            offset = offset,
            limit = limit,
            "Fetching page"
        );

        let response = match self
            .retry_request(|| self.query_page(&url, offset, limit))
            .await
        {
            // The cached token was dropped; one more round with a fresh one
            Err(DataExportError::Source(SourceError::TokenRejected(reason))) => {
                tracing::warn!(
                    resource_type = %resource_type,
                    offset = offset,
                    reason = %reason,
                    "Access token rejected, re-authenticating"
                );
                self.retry_request(|| self.query_page(&url, offset, limit))
                    .await?
            }
            result => result?,
        };

        let page = response.into_page(limit);
        tracing::debug!(
            resource_type = %resource_type,
            offset = offset,
            records = page.records.len(),
            total_pages = page.total_pages,
            "Fetched page"
        );
        Ok(page)
    }
}

fn transport_error(e: reqwest::Error) -> DataExportError {
    if e.is_timeout() {
        SourceError::Timeout(e.to_string()).into()
    } else {
        SourceError::ConnectionFailed(e.to_string()).into()
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    let code = status.as_u16();
    let error = if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        SourceError::AuthenticationFailed(format!("status {status}: {message}"))
    } else if status.is_server_error() {
        SourceError::ServerError {
            status: code,
            message,
        }
    } else {
        SourceError::ClientError {
            status: code,
            message,
        }
    };
    Err(error.into())
}

fn is_retryable(error: &DataExportError) -> bool {
    matches!(error, DataExportError::Source(source) if source.is_transient())
}

fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let factor = retry.backoff_multiplier.powf(attempt.saturating_sub(1) as f64);
    let delay = (retry.initial_delay_ms as f64 * factor) as u64;
    delay.min(retry.max_delay_ms)
}
