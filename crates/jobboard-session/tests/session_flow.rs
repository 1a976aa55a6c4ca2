//! End-to-end session flows over HTTP against a mock backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobboard_client::{
    ApiClient, AuthClient, ClientConfig, FileTokenStore, JobsClient, LogNavigator, TokenStore,
};
use jobboard_models::Role;
use jobboard_session::{
    landing_route, Navigation, Route, Router, SessionConfig, SessionPhase, SessionStore,
};

struct App {
    server: MockServer,
    api: ApiClient,
    store: Arc<SessionStore>,
    tokens: Arc<FileTokenStore>,
    navigator: Arc<LogNavigator>,
    _dir: tempfile::TempDir,
}

async fn app(persisted: Option<&str>) -> App {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let tokens = Arc::new(FileTokenStore::new(dir.path().join("token.json")));
    if let Some(token) = persisted {
        tokens.set(token).unwrap();
    }

    let navigator = Arc::new(LogNavigator::new());
    let config = ClientConfig::default().with_base_url(format!("{}/api/v1", server.uri()));
    let api = ApiClient::new(config, tokens.clone(), navigator.clone()).unwrap();

    let store = Arc::new(SessionStore::new(
        Arc::new(AuthClient::new(api.clone())),
        tokens.clone(),
        SessionConfig::default(),
    ));
    store.watch_transport(api.subscribe());

    App {
        server,
        api,
        store,
        tokens,
        navigator,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_login_scenario_admin() {
    let app = app(None).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "1", "username": "a", "email": "a@b.com", "role": "ADMIN"},
            "accessToken": "tok1"
        })))
        .mount(&app.server)
        .await;

    app.store.initialize_auth().await;
    app.store.login("a@b.com", "secret").await.unwrap();
    let state = app.store.state();

    assert_eq!(state.role().map(Role::as_str), Some("admin"));
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("tok1"));
    assert_eq!(app.tokens.get().as_deref(), Some("tok1"));
    assert_eq!(landing_route(state.role()), Route::AdminDashboard);
    assert_eq!(
        Router::new().resolve("/admin/post-job", &state),
        Navigation::Render(Route::PostJob)
    );
}

#[tokio::test]
async fn test_rejected_login_does_not_navigate() {
    let app = app(None).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})))
        .mount(&app.server)
        .await;

    app.store.initialize_auth().await;
    let err = app.store.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(app.store.state().error.as_deref(), Some("Invalid credentials"));
    assert_eq!(app.navigator.last_location(), None);
}

#[tokio::test]
async fn test_initialize_with_rejected_token() {
    let app = app(Some("expired")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer expired"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .expect(1)
        .mount(&app.server)
        .await;

    let state = app.store.initialize_auth().await;

    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert!(!state.loading);
    assert_eq!(app.tokens.get(), None);
    assert_eq!(app.navigator.last_location().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_initialize_restores_persisted_session() {
    let app = app(Some("good")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 2, "username": "u", "email": "u@x.io", "role": "User"}
        })))
        .mount(&app.server)
        .await;

    let state = app.store.initialize_auth().await;

    assert!(state.is_authenticated);
    assert_eq!(state.role(), Some(&Role::User));
    assert_eq!(
        Router::new().resolve("/admin-dashboard", &state),
        Navigation::Redirect(Route::UserDashboard)
    );
}

#[tokio::test]
async fn test_any_401_signs_the_session_out() {
    let app = app(Some("good")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 9, "username": "boss", "email": "b@x.io", "role": "admin"}
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/jobs/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.server)
        .await;

    assert!(app.store.initialize_auth().await.is_authenticated);
    let mut states = app.store.subscribe();

    let err = JobsClient::new(app.api.clone()).mine().await.unwrap_err();
    assert!(err.is_unauthorized());

    let state = tokio::time::timeout(
        Duration::from_secs(2),
        states.wait_for(|s| !s.is_authenticated),
    )
    .await
    .unwrap()
    .unwrap()
    .clone();

    assert_eq!(state.phase, SessionPhase::Anonymous);
    assert_eq!(app.tokens.get(), None);
    assert_eq!(app.navigator.last_location().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_login_survives_late_401_for_previous_token() {
    let app = app(Some("old")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .and(header("authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401).set_delay(Duration::from_millis(300)))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "1", "username": "a", "email": "a@b.com", "role": "ADMIN"},
            "accessToken": "tok1"
        })))
        .mount(&app.server)
        .await;

    let login = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        app.store.login("a@b.com", "secret").await
    };
    let (_, logged_in) = tokio::join!(app.store.initialize_auth(), login);
    assert_eq!(logged_in.unwrap().role, Role::Admin);

    // Let the listener drain anything the late 401 might have published.
    tokio::time::sleep(Duration::from_millis(100)).await;

    let state = app.store.state();
    assert!(state.is_authenticated);
    assert_eq!(state.token.as_deref(), Some("tok1"));
    assert_eq!(app.tokens.get().as_deref(), Some("tok1"));
    assert_eq!(app.navigator.last_location(), None);
}

#[tokio::test]
async fn test_logout_survives_backend_failure() {
    let app = app(Some("good")).await;

    Mock::given(method("GET"))
        .and(path("/api/v1/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 2, "username": "u", "email": "u@x.io", "role": "user"}
        })))
        .mount(&app.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.server)
        .await;

    app.store.initialize_auth().await;
    app.store.logout().await;

    let state = app.store.state();
    assert!(!state.is_authenticated);
    assert_eq!(state.user, None);
    assert_eq!(app.tokens.get(), None);
    assert!(!app.tokens.path().exists());
}
