#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use moviehunt_api::auth::supabase::{AppMetadata, Claims, SupabaseAuthConfig};
use moviehunt_api::config::ServerConfig;
use moviehunt_api::router::build_app_router;
use moviehunt_api::state::AppState;
use moviehunt_catalog::{CatalogConfig, CatalogService};
use moviehunt_mail::{MailError, OutgoingEmail, TransactionalMailer};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-jwt-secret-with-at-least-32-characters!";
pub const ADMIN_EMAIL: &str = "editor@moviehunt.test";
pub const OWNER_EMAIL: &str = "owner@moviehunt.test";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 5,
        cache_ttl_secs: 300,
        static_dir: None,
        site_url: "https://moviehunt.test".to_string(),
        mail_from: "MovieHunt <noreply@moviehunt.test>".to_string(),
        contact_recipient: Some(OWNER_EMAIL.to_string()),
        auth: SupabaseAuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
            audience: "authenticated".to_string(),
            admin_emails: vec![ADMIN_EMAIL.to_string()],
        },
    }
}

/// Mailer that keeps sent messages in memory.
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<OutgoingEmail>>,
}

#[async_trait]
impl TransactionalMailer for RecordingMailer {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

/// Application state without any third-party integration configured.
pub fn test_state(pool: PgPool) -> AppState {
    let catalog = CatalogService::new(pool.clone(), None, CatalogConfig::default());
    AppState {
        pool,
        config: Arc::new(test_config()),
        catalog: Arc::new(catalog),
        tmdb: None,
        deepl: None,
        mailer: None,
        newsletter: None,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(test_state(pool), &test_config())
}

/// Like [`build_test_app`] with a recording mailer wired in.
pub fn build_test_app_with_mailer(pool: PgPool) -> (Router, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let mut state = test_state(pool);
    state.mailer = Some(mailer.clone() as Arc<dyn TransactionalMailer>);
    (build_app_router(state, &test_config()), mailer)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token_for(email: &str, role: Option<&str>) -> String {
    let claims = Claims {
        sub: Uuid::new_v4(),
        email: Some(email.to_string()),
        role: Some("authenticated".to_string()),
        app_metadata: AppMetadata {
            role: role.map(String::from),
        },
        aud: "authenticated".to_string(),
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

/// Token of an allow-listed admin.
pub fn admin_token() -> String {
    token_for(ADMIN_EMAIL, None)
}

/// Token of a signed-in reader without admin rights.
pub fn reader_token() -> String {
    token_for("reader@example.com", None)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn get_with_header(app: Router, uri: &str, name: &str, value: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(name, value)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    get_with_header(app, uri, "authorization", &format!("Bearer {token}")).await
}

fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, &body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), &body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), &body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::delete(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
