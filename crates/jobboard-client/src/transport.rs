//! Shared HTTP transport.
//!
//! Every resource client goes through [`ApiClient`], which:
//! - attaches `Authorization: Bearer <token>` when a token is persisted
//! - keeps a cookie store so credentialed requests carry session cookies
//! - maps non-success responses to [`ClientError`]
//! - on a 401 for a session-bound request, clears the persisted token,
//!   navigates to the login view and broadcasts [`TransportEvent::SessionExpired`]
//!
//! A 401 only ends the session whose token the request carried. If the
//! persisted token was replaced while the request was in flight, the 401 is
//! returned to the caller and nothing else happens.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info_span, warn, Instrument};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::metrics::{record_request, record_session_expired};
use crate::navigator::{Navigator, LOGIN_PATH};
use crate::token_store::TokenStore;

/// Capacity of the transport event channel.
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Events the transport publishes to interested components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The backend rejected the session; the persisted token has been cleared.
    /// `token` is the bearer the rejected request carried, if any.
    SessionExpired {
        operation: String,
        token: Option<String>,
    },
}

/// What a 401 response means for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnauthorizedPolicy {
    /// The request relied on an existing session: a 401 ends it.
    #[default]
    ExpireSession,
    /// Credential exchange (login, register, password reset): a 401 is an
    /// ordinary rejection reported to the caller.
    Report,
}

/// HTTP client shared by all resource clients.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    events: broadcast::Sender<TransportEvent>,
}

impl Clone for ApiClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            config: self.config.clone(),
            tokens: Arc::clone(&self.tokens),
            navigator: Arc::clone(&self.navigator),
            events: self.events.clone(),
        }
    }
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(
        config: ClientConfig,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
    ) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .cookie_store(true)
            .user_agent(concat!("jobboard-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Network)?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            http,
            config,
            tokens,
            navigator,
            events,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Persisted token storage shared with the session store.
    pub fn tokens(&self) -> Arc<dyn TokenStore> {
        Arc::clone(&self.tokens)
    }

    /// Subscribe to transport events (session expiry).
    pub fn subscribe(&self) -> broadcast::Receiver<TransportEvent> {
        self.events.subscribe()
    }

    // =========================================================================
    // Typed helpers
    // =========================================================================

    pub async fn get<T: DeserializeOwned>(&self, operation: &str, path: &str) -> ClientResult<T> {
        self.execute(operation, Method::GET, path, UnauthorizedPolicy::ExpireSession, |r| r)
            .await
    }

    pub async fn get_with_query<T, Q>(&self, operation: &str, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.execute(operation, Method::GET, path, UnauthorizedPolicy::ExpireSession, |r| {
            r.query(query)
        })
        .await
    }

    pub async fn post<T, B>(&self, operation: &str, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(operation, Method::POST, path, UnauthorizedPolicy::ExpireSession, |r| {
            r.json(body)
        })
        .await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, operation: &str, path: &str) -> ClientResult<T> {
        self.execute(operation, Method::POST, path, UnauthorizedPolicy::ExpireSession, |r| r)
            .await
    }

    /// POST that exchanges credentials; a 401 is reported, not treated as expiry.
    pub async fn post_credentials<T, B>(&self, operation: &str, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(operation, Method::POST, path, UnauthorizedPolicy::Report, |r| {
            r.json(body)
        })
        .await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        operation: &str,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> ClientResult<T> {
        self.execute(operation, Method::POST, path, UnauthorizedPolicy::ExpireSession, |r| {
            r.multipart(form)
        })
        .await
    }

    pub async fn patch<T, B>(&self, operation: &str, path: &str, body: &B) -> ClientResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.execute(operation, Method::PATCH, path, UnauthorizedPolicy::ExpireSession, |r| {
            r.json(body)
        })
        .await
    }

    /// PATCH without a body.
    pub async fn patch_empty<T: DeserializeOwned>(&self, operation: &str, path: &str) -> ClientResult<T> {
        self.execute(operation, Method::PATCH, path, UnauthorizedPolicy::ExpireSession, |r| r)
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, operation: &str, path: &str) -> ClientResult<T> {
        self.execute(operation, Method::DELETE, path, UnauthorizedPolicy::ExpireSession, |r| r)
            .await
    }

    /// Send a request and ignore the response body on success.
    pub async fn send_discard(&self, operation: &str, method: Method, path: &str) -> ClientResult<()> {
        self.execute_raw(operation, method, path, UnauthorizedPolicy::ExpireSession, |r| r)
            .await
            .map(|_| ())
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    async fn execute<T, F>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        policy: UnauthorizedPolicy,
        build: F,
    ) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let body = self.execute_raw(operation, method, path, policy, build).await?;
        decode(operation, &body)
    }

    /// Execute a request with tracing and metrics, returning the raw body.
    async fn execute_raw<F>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        policy: UnauthorizedPolicy,
        build: F,
    ) -> ClientResult<String>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = self.config.endpoint(path);
        let span = info_span!("api_request", operation = %operation, method = %method, path = %path);

        async {
            let mut request = build(self.http.request(method.clone(), &url));
            let bearer = self.tokens.get();
            if let Some(token) = &bearer {
                request = request.bearer_auth(token);
            }

            let start = Instant::now();
            let response = request.send().await;
            let latency_ms = start.elapsed().as_millis() as f64;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    record_request(operation, 0, latency_ms);
                    if e.is_timeout() {
                        return Err(ClientError::Timeout(format!("{} {}", method, path)));
                    }
                    return Err(ClientError::Network(e));
                }
            };

            let status = response.status();
            record_request(operation, status.as_u16(), latency_ms);
            let body = response.text().await?;

            if status.is_success() {
                debug!(status = status.as_u16(), latency_ms, "API request succeeded");
                return Ok(body);
            }

            if status == StatusCode::UNAUTHORIZED && policy == UnauthorizedPolicy::ExpireSession {
                self.expire_session(operation, bearer);
            }

            Err(ClientError::from_http_status(status.as_u16(), &body))
        }
        .instrument(span)
        .await
    }

    /// Global 401 side effect: drop the persisted token, force the login
    /// view, and tell subscribers the session is gone. Skipped when `bearer`
    /// is no longer the persisted token.
    fn expire_session(&self, operation: &str, bearer: Option<String>) {
        let current = match &bearer {
            Some(token) => self.tokens.clear_if(token).unwrap_or_else(|e| {
                warn!(error = %e, "Failed to clear persisted token");
                true
            }),
            None => self.tokens.get().is_none(),
        };
        if !current {
            debug!(operation = %operation, "Ignoring 401 for a token that has been replaced");
            return;
        }

        warn!(operation = %operation, "Session rejected by backend, signing out");
        record_session_expired(operation);
        self.navigator.navigate(LOGIN_PATH);

        // No subscribers is fine: nothing else holds session state.
        let _ = self.events.send(TransportEvent::SessionExpired {
            operation: operation.to_string(),
            token: bearer,
        });
    }
}

/// Decode a success body; an empty body (204) decodes as `{}`.
fn decode<T: DeserializeOwned>(operation: &str, body: &str) -> ClientResult<T> {
    let payload = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(payload).map_err(|e| {
        ClientError::invalid_response(format!(
            "{}: {} (body prefix: {})",
            operation,
            e,
            body.chars().take(200).collect::<String>()
        ))
    })
}
