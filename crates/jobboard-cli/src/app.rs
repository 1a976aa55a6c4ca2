//! Wiring of clients, session store and router.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use jobboard_client::{
    AdminClient, ApiClient, ApplicationsClient, AuthClient, ClientConfig, FileTokenStore,
    JobsClient, LogNavigator, Navigator, TokenStore,
};
use jobboard_session::{Access, Navigation, Route, Router, SessionConfig, SessionStore};

/// Everything a view needs.
pub struct App {
    pub api: ApiClient,
    pub auth: AuthClient,
    pub jobs: JobsClient,
    pub applications: ApplicationsClient,
    pub admin: AdminClient,
    pub session: Arc<SessionStore>,
    pub navigator: Arc<LogNavigator>,
    router: Router,
    login_required: AtomicBool,
}

impl App {
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::new(config, SessionConfig::from_env())
    }

    /// Build the app. Must be called inside a Tokio runtime: the session
    /// store starts listening for transport expiry events here.
    pub fn new(config: ClientConfig, session_config: SessionConfig) -> Result<Self> {
        debug!(base_url = %config.base_url, token_file = %config.token_file.display(), "Building client");

        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
        let navigator = Arc::new(LogNavigator::new());
        let api = ApiClient::new(config, Arc::clone(&tokens), navigator.clone())?;

        let auth = AuthClient::new(api.clone());
        let session = Arc::new(SessionStore::new(
            Arc::new(auth.clone()),
            tokens,
            session_config,
        ));
        session.watch_transport(api.subscribe());

        Ok(Self {
            jobs: JobsClient::new(api.clone()),
            applications: ApplicationsClient::new(api.clone()),
            admin: AdminClient::new(api.clone()),
            auth,
            api,
            session,
            navigator,
            router: Router::new(),
            login_required: AtomicBool::new(false),
        })
    }

    /// Resolve `route` for the current session, restoring it first when the
    /// route is protected. Prints the placeholder or redirect and returns
    /// `false` when the view must not render.
    pub async fn enter(&self, route: Route) -> bool {
        match self.navigate(route).await {
            Navigation::Render(_) => true,
            Navigation::Pending => {
                println!("Loading...");
                false
            }
            Navigation::Redirect(target) => {
                if target == Route::Login {
                    self.login_required.store(true, Ordering::SeqCst);
                    println!("Please log in first: jobboard login --email <EMAIL> --password <PASSWORD>");
                } else {
                    println!("Redirecting to {}", target);
                }
                false
            }
        }
    }

    /// Whether a view was turned away because nobody is signed in.
    pub fn login_required(&self) -> bool {
        self.login_required.load(Ordering::SeqCst)
    }

    /// Resolve `route` and record any redirect with the navigator.
    pub async fn navigate(&self, route: Route) -> Navigation {
        if route.access() == Access::Public {
            return Navigation::Render(route);
        }

        self.session.initialize_auth().await;
        let state = self.session.settled().await;
        let navigation = self.router.resolve_route(route, &state);

        if let Navigation::Redirect(target) = &navigation {
            self.navigator.navigate(&target.path());
        }
        navigation
    }
}
