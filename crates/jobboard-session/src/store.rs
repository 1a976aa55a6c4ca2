//! Session store.
//!
//! A single [`SessionStore`] is created at startup and shared (via `Arc`)
//! with every view that needs to know who is signed in. State changes are
//! published on a `watch` channel.
//!
//! Every operation draws a ticket from a monotonically increasing epoch and
//! only applies its result if that ticket is still the newest, so a slow
//! response can never overwrite a newer intent. Logout and expiry advance
//! the epoch too. Epoch updates happen while the state channel is locked, so
//! ticket checks and state writes are atomic with respect to each other.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use jobboard_client::{AuthClient, ClientError, ClientResult, TokenStore, TransportEvent};
use jobboard_models::{validate_form, AuthResponse, LoginRequest, ModelError, RegisterRequest, User};

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::state::SessionState;

const LOGIN_FALLBACK: &str = "Invalid email or password";
const REGISTER_FALLBACK: &str = "Something went wrong";
const FETCH_USER_FALLBACK: &str = "Could not load your account";
const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Auth endpoints the store depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse>;

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse>;

    async fn logout(&self) -> ClientResult<()>;

    async fn current_user(&self) -> ClientResult<User>;
}

#[async_trait]
impl AuthApi for AuthClient {
    async fn login(&self, request: &LoginRequest) -> ClientResult<AuthResponse> {
        AuthClient::login(self, request).await
    }

    async fn register(&self, request: &RegisterRequest) -> ClientResult<AuthResponse> {
        AuthClient::register(self, request).await
    }

    async fn logout(&self) -> ClientResult<()> {
        AuthClient::logout(self).await
    }

    async fn current_user(&self) -> ClientResult<User> {
        AuthClient::current_user(self).await
    }
}

/// Authentication state machine.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    config: SessionConfig,
    state: watch::Sender<SessionState>,
    epoch: AtomicU64,
    initialized: AtomicBool,
}

impl SessionStore {
    pub fn new(api: Arc<dyn AuthApi>, tokens: Arc<dyn TokenStore>, config: SessionConfig) -> Self {
        let (state, _) = watch::channel(SessionState::initial());

        Self {
            api,
            tokens,
            config,
            state,
            epoch: AtomicU64::new(0),
            initialized: AtomicBool::new(false),
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Wait until no auth-determining request is in flight.
    pub async fn settled(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Restore the session from the persisted token. Runs once; later calls
    /// return the current state without doing anything.
    pub async fn initialize_auth(&self) -> SessionState {
        if self.initialized.swap(true, Ordering::SeqCst) {
            debug!("Session already initialized");
            return self.state();
        }

        if self.tokens.get().is_none() {
            debug!("No persisted token, starting anonymous");
            self.reset(None);
            return self.state();
        }

        if let Err(e) = self.fetch_user().await {
            debug!(error = %e, "Persisted session was not restored");
        }
        self.state()
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> SessionResult<User> {
        let request = LoginRequest::new(email, password);
        validate_form(&request).map_err(|e| self.reject_input(e))?;

        let ticket = self.begin(None);
        let result = self.bounded("login", self.api.login(&request)).await;
        self.settle_credentials(ticket, "login", result, LOGIN_FALLBACK)
    }

    /// Create an account and sign in with it.
    pub async fn register(&self, request: &RegisterRequest) -> SessionResult<User> {
        validate_form(request).map_err(|e| self.reject_input(e))?;

        let ticket = self.begin(None);
        let result = self.bounded("register", self.api.register(request)).await;
        self.settle_credentials(ticket, "register", result, REGISTER_FALLBACK)
    }

    /// Sign out. The remote call is best effort and time-bounded; the local
    /// token and state are always cleared afterwards.
    pub async fn logout(&self) {
        self.advance();

        match timeout(self.config.logout_timeout, self.api.logout()).await {
            Ok(Ok(())) => debug!("Remote logout succeeded"),
            Ok(Err(e)) => warn!(error = %e, "Remote logout failed, clearing local session anyway"),
            Err(_) => warn!(
                timeout_secs = self.config.logout_timeout.as_secs_f64(),
                "Remote logout timed out, clearing local session anyway"
            ),
        }

        self.reset(None);
        info!("Signed out");
    }

    /// Load the current user for the persisted token.
    ///
    /// Returns `Ok(None)` without a request when no token is persisted. Any
    /// failure clears the persisted token.
    pub async fn fetch_user(&self) -> SessionResult<Option<User>> {
        let Some(token) = self.tokens.get() else {
            self.reset(None);
            return Ok(None);
        };

        let ticket = self.begin(Some(token.clone()));
        let result = self.bounded("fetch_user", self.api.current_user()).await;

        match result {
            Ok(user) => {
                let applied = self.commit(ticket, |state| {
                    *state = SessionState::authenticated(user.clone(), token);
                });
                if !applied {
                    return Err(self.discarded("fetch_user"));
                }
                debug!(user_id = %user.id, role = %user.role, "Session restored");
                Ok(Some(user))
            }
            Err(e) => {
                let message = failure_message(&e, FETCH_USER_FALLBACK);
                let applied = self.commit(ticket, |state| {
                    if let Err(e) = self.tokens.clear() {
                        warn!(error = %e, "Failed to clear persisted token");
                    }
                    *state = SessionState::anonymous(None);
                });
                if !applied {
                    return Err(self.discarded("fetch_user"));
                }
                warn!(error = %e, "Fetching current user failed, session cleared");
                Err(SessionError::Rejected(message))
            }
        }
    }

    /// Drop to anonymous after the backend rejected the session.
    pub fn expire(&self) {
        info!("Session expired");
        self.reset(None);
    }

    /// Like [`SessionStore::expire`], but only if the session still holds
    /// `token`. A rejection of an older token leaves a newer session alone.
    pub fn expire_token(&self, token: &str) -> bool {
        let expired = self.state.send_if_modified(|state| {
            if state.token.as_deref() != Some(token) {
                return false;
            }
            self.epoch.fetch_add(1, Ordering::SeqCst);
            if let Err(e) = self.tokens.clear_if(token) {
                warn!(error = %e, "Failed to clear persisted token");
            }
            *state = SessionState::anonymous(None);
            true
        });

        if expired {
            info!("Session expired");
        } else {
            debug!("Ignoring expiry of a token the session no longer holds");
        }
        expired
    }

    /// Translate transport expiry events into [`SessionStore::expire_token`].
    ///
    /// The listener holds only a weak reference and stops when the store is
    /// dropped or the transport goes away.
    pub fn watch_transport(
        self: &Arc<Self>,
        mut events: broadcast::Receiver<TransportEvent>,
    ) -> JoinHandle<()> {
        let store: Weak<Self> = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(TransportEvent::SessionExpired { operation, token }) => {
                        let Some(store) = store.upgrade() else { break };
                        // A request without a bearer had no session to end.
                        let Some(token) = token else { continue };
                        debug!(operation = %operation, "Transport rejected the session");
                        store.expire_token(&token);
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed transport events");
                        let Some(store) = store.upgrade() else { break };
                        if store.tokens.get().is_none() && store.state().is_authenticated {
                            store.expire();
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        })
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Start an auth-determining operation: take a ticket and enter `Checking`.
    fn begin(&self, token: Option<String>) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
            *state = SessionState::checking(token);
        });
        ticket
    }

    /// Invalidate in-flight operations without touching state.
    fn advance(&self) {
        self.state.send_if_modified(|_| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            false
        });
    }

    /// Apply `update` only if `ticket` is still the newest.
    fn commit(&self, ticket: u64, update: impl FnOnce(&mut SessionState)) -> bool {
        self.state.send_if_modified(|state| {
            if self.epoch.load(Ordering::SeqCst) != ticket {
                return false;
            }
            update(state);
            true
        })
    }

    /// Clear the persisted token and go anonymous, invalidating anything in flight.
    fn reset(&self, error: Option<String>) {
        self.state.send_modify(|state| {
            self.epoch.fetch_add(1, Ordering::SeqCst);
            if let Err(e) = self.tokens.clear() {
                warn!(error = %e, "Failed to clear persisted token");
            }
            *state = SessionState::anonymous(error);
        });
    }

    /// Record a local validation failure. Authentication is left as is.
    fn reject_input(&self, error: ModelError) -> SessionError {
        let message = error.message();
        self.state.send_modify(|state| state.error = Some(message.clone()));
        SessionError::Rejected(message)
    }

    fn discarded(&self, operation: &str) -> SessionError {
        debug!(operation, "Discarding stale session response");
        SessionError::Superseded
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        request: impl Future<Output = ClientResult<T>>,
    ) -> ClientResult<T> {
        match timeout(self.config.auth_timeout, request).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    operation,
                    timeout_secs = self.config.auth_timeout.as_secs_f64(),
                    "Auth request timed out"
                );
                Err(ClientError::Timeout(operation.to_string()))
            }
        }
    }

    /// Apply the outcome of a login or register call.
    fn settle_credentials(
        &self,
        ticket: u64,
        operation: &str,
        result: ClientResult<AuthResponse>,
        fallback: &str,
    ) -> SessionResult<User> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                let message = failure_message(&e, fallback);
                let applied = self.commit(ticket, |state| {
                    *state = SessionState::anonymous(Some(message.clone()));
                });
                if !applied {
                    return Err(self.discarded(operation));
                }
                warn!(operation, error = %e, "Authentication failed");
                return Err(SessionError::Rejected(message));
            }
        };

        let AuthResponse { user, access_token } = response;
        let mut outcome = Ok(user.clone());

        let applied = self.commit(ticket, |state| match self.tokens.set(&access_token) {
            Ok(()) => *state = SessionState::authenticated(user.clone(), access_token),
            Err(e) => {
                let message = e.to_string();
                *state = SessionState::anonymous(Some(message.clone()));
                outcome = Err(SessionError::Rejected(message));
            }
        });
        if !applied {
            return Err(self.discarded(operation));
        }

        if outcome.is_ok() {
            info!(operation, user_id = %user.id, role = %user.role, "Signed in");
        }
        outcome
    }
}

/// Message shown for a failed auth call: the backend's own message when it
/// sent one, otherwise `fallback`.
fn failure_message(error: &ClientError, fallback: &str) -> String {
    match error {
        ClientError::Validation(e) => e.message(),
        ClientError::Timeout(_) => TIMEOUT_MESSAGE.to_string(),
        other => other
            .backend_message()
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string()),
    }
}
