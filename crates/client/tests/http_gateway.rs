use std::sync::Arc;

use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use gridcast_client::{
    AppUser, AuthClient, AuthError, ClientConfig, GatewayError, HttpGateway, InMemorySessionStore,
    RemoteGateway, ResilientAccess, Session, SessionStore,
};
use gridcast_client::session::REGISTERED_USER_KEY;
use gridcast_store::{ForecastFilter, ReferenceStore};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(app: Router) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn gateway(&self) -> HttpGateway {
        HttpGateway::new(&ClientConfig::new(&self.base_url)).unwrap()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn service() -> Router {
    Router::new()
        .route(
            "/suppliers",
            get(|| async { Json(json!([{ "id": 1, "name": "Live Supplier" }])) }),
        )
        .route(
            "/forecast/history",
            get(|axum::extract::RawQuery(query): axum::extract::RawQuery| async move {
                Json(json!({ "forecasts": [{
                    "projectName": query.unwrap_or_default(),
                    "estimatedCost": 10.0
                }] }))
            }),
        )
        .route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get(header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "contentType": content_type, "body": body }))
            }),
        )
        .route(
            "/err/detail",
            get(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": "budget must be positive", "message": "ignored" })),
                )
            }),
        )
        .route(
            "/err/message",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "model not loaded" })),
                )
            }),
        )
        .route(
            "/err/text",
            get(|| async { (StatusCode::BAD_GATEWAY, "upstream timed out") }),
        )
        .route("/err/empty", get(|| async { StatusCode::SERVICE_UNAVAILABLE }))
        .route("/malformed", get(|| async { "<html>maintenance</html>" }))
        .route(
            "/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({ "id": 7, "email": body["email"] })))
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({ "detail": "Invalid credentials" })))
                }
            }),
        )
        .route(
            "/auth/register",
            post(|| async { Json(json!({ "id": 8, "email": "new@grid.example" })) }),
        )
}

async fn rejection(server: &TestServer, path: &str) -> (u16, String) {
    match server.gateway().get(path, &[]).await {
        Err(GatewayError::Rejected { status, message }) => (status, message),
        other => panic!("expected rejection for {path}, got {other:?}"),
    }
}

#[tokio::test]
async fn get_decodes_json() {
    let server = TestServer::spawn(service()).await;

    let value = server.gateway().get("/suppliers", &[]).await.unwrap();
    assert_eq!(value[0]["name"], "Live Supplier");
}

#[tokio::test]
async fn post_sends_json_content_type() {
    let server = TestServer::spawn(service()).await;

    let value = server
        .gateway()
        .post("/echo", &json!({ "project_name": "North Grid" }))
        .await
        .unwrap();

    assert_eq!(value["contentType"], "application/json");
    assert_eq!(value["body"]["project_name"], "North Grid");
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_ignored() {
    let server = TestServer::spawn(service()).await;
    let gateway = HttpGateway::new(&ClientConfig::new(format!("{}/", server.base_url))).unwrap();

    assert_eq!(gateway.base_url(), server.base_url);
    assert!(gateway.get("/suppliers", &[]).await.is_ok());
}

#[tokio::test]
async fn error_messages_are_extracted_in_order() {
    let server = TestServer::spawn(service()).await;

    assert_eq!(rejection(&server, "/err/detail").await, (422, "budget must be positive".into()));
    assert_eq!(rejection(&server, "/err/message").await, (500, "model not loaded".into()));
    assert_eq!(rejection(&server, "/err/text").await, (502, "upstream timed out".into()));
    assert_eq!(rejection(&server, "/err/empty").await, (503, "Service Unavailable".into()));
    assert_eq!(rejection(&server, "/nowhere").await.0, 404);
}

#[tokio::test]
async fn non_json_success_is_malformed() {
    let server = TestServer::spawn(service()).await;

    let err = server.gateway().get("/malformed", &[]).await.unwrap_err();
    assert!(matches!(err, GatewayError::Malformed(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Reserve a port, then free it so nothing listens there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let gateway = HttpGateway::new(&ClientConfig::new(dead)).unwrap();

    let err = gateway.get("/suppliers", &[]).await.unwrap_err();
    assert!(err.is_transport(), "{err:?}");
}

#[tokio::test]
async fn access_layer_over_http_mixes_live_and_local() {
    let server = TestServer::spawn(service()).await;
    let access = ResilientAccess::new(
        Arc::new(server.gateway()),
        Arc::new(ReferenceStore::seeded()),
    );

    // Served live.
    let suppliers = access.suppliers().await;
    assert_eq!(suppliers.len(), 1);

    // 404 on the service: answered locally.
    let orders = access.procurement_orders().await;
    assert_eq!(orders, ReferenceStore::seeded().procurement_orders());

    // Query string reaches the service.
    let filter = ForecastFilter {
        project_name: Some("Ridge".into()),
        ..ForecastFilter::default()
    };
    let history = access.forecast_history(&filter).await;
    assert_eq!(history[0].project_name, "projectName=Ridge");
}

#[tokio::test]
async fn sign_in_persists_session() {
    let server = TestServer::spawn(service()).await;
    let session = Arc::new(InMemorySessionStore::new());
    let auth = AuthClient::new(Arc::new(server.gateway()), session.clone());

    let user = auth.sign_in("ops@grid.example", "secret").await.unwrap();
    assert_eq!(user.user_id.as_str(), "7");
    assert_eq!(user.email.as_deref(), Some("ops@grid.example"));
    assert_eq!(Session::current(session.as_ref()), Some(user));

    auth.logout();
    assert!(auth.current_user().is_none());
}

#[tokio::test]
async fn failed_sign_in_surfaces_server_message() {
    let server = TestServer::spawn(service()).await;
    let session = Arc::new(InMemorySessionStore::new());
    let auth = AuthClient::new(Arc::new(server.gateway()), session.clone());

    let err = auth.sign_in("ops@grid.example", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(!Session::is_active(session.as_ref()));
}

#[tokio::test]
async fn sign_up_does_not_sign_in() {
    let server = TestServer::spawn(service()).await;
    let session = Arc::new(InMemorySessionStore::new());
    let auth = AuthClient::new(Arc::new(server.gateway()), session.clone());

    let created = auth.sign_up("new@grid.example", "pw").await.unwrap();
    assert_eq!(created.user_id.as_str(), "8");
    assert!(auth.current_user().is_none());

    let stored = session.get(REGISTERED_USER_KEY).unwrap();
    assert_eq!(serde_json::from_str::<AppUser>(&stored).unwrap(), created);
}

#[tokio::test]
async fn missing_reset_endpoint_is_reported_as_unsupported() {
    let server = TestServer::spawn(service()).await;
    let auth = AuthClient::new(
        Arc::new(server.gateway()),
        Arc::new(InMemorySessionStore::new()),
    );

    let err = auth.reset_password("ops@grid.example").await.unwrap_err();
    assert!(matches!(err, AuthError::ResetUnsupported(_)), "{err:?}");
}

#[tokio::test]
async fn reset_rejection_carries_server_detail() {
    let app = Router::new().route(
        "/auth/reset",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "unknown email" })),
            )
        }),
    );
    let server = TestServer::spawn(app).await;
    let auth = AuthClient::new(
        Arc::new(server.gateway()),
        Arc::new(InMemorySessionStore::new()),
    );

    let err = auth.reset_password("nobody@grid.example").await.unwrap_err();

    assert!(matches!(err, AuthError::Remote(_)), "{err:?}");
    assert_eq!(err.to_string(), "unknown email");
}

#[tokio::test]
async fn reset_against_unreachable_server_is_unsupported() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let auth = AuthClient::new(
        Arc::new(HttpGateway::new(&ClientConfig::new(dead)).unwrap()),
        Arc::new(InMemorySessionStore::new()),
    );

    let err = auth.reset_password("ops@grid.example").await.unwrap_err();

    assert!(matches!(err, AuthError::ResetUnsupported(_)), "{err:?}");
}
