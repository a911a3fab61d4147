use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use moviehunt_catalog::{CatalogConfig, CatalogService};
use moviehunt_deepl::{DeeplClient, DeeplConfig};
use moviehunt_mail::{
    MailerLiteClient, MailerLiteConfig, ResendClient, ResendConfig, SmtpConfig, SmtpMailer,
    TransactionalMailer,
};
use moviehunt_tmdb::{TmdbClient, TmdbConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moviehunt_api::config::ServerConfig;
use moviehunt_api::router::build_app_router;
use moviehunt_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "moviehunt_api=debug,moviehunt_catalog=debug,tower_http=debug".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = moviehunt_db::create_pool(&database_url, config.db_max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    moviehunt_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    moviehunt_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Integrations ---
    let tmdb = TmdbConfig::from_env()
        .map(|c| Arc::new(TmdbClient::new(c).expect("Failed to build TMDB client")));
    let deepl = DeeplConfig::from_env()
        .map(|c| Arc::new(DeeplClient::new(c).expect("Failed to build DeepL client")));
    let mailer = build_mailer();
    let newsletter = MailerLiteConfig::from_env()
        .map(|c| Arc::new(MailerLiteClient::new(c).expect("Failed to build MailerLite client")));

    tracing::info!(
        tmdb = tmdb.is_some(),
        deepl = deepl.is_some(),
        mailer = mailer.as_ref().map(|m| m.name()).unwrap_or("none"),
        newsletter = newsletter.is_some(),
        "Integrations configured"
    );

    // --- Catalog ---
    let catalog = Arc::new(CatalogService::new(
        pool.clone(),
        tmdb.clone(),
        CatalogConfig {
            cache_ttl: Duration::from_secs(config.cache_ttl_secs),
            ..Default::default()
        },
    ));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        catalog,
        tmdb,
        deepl,
        mailer,
        newsletter,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Resend when `RESEND_API_KEY` is set, otherwise SMTP when `SMTP_HOST` is.
fn build_mailer() -> Option<Arc<dyn TransactionalMailer>> {
    if let Some(config) = ResendConfig::from_env() {
        let client = ResendClient::new(config).expect("Failed to build Resend client");
        return Some(Arc::new(client));
    }
    SmtpConfig::from_env().map(|config| {
        let mailer = SmtpMailer::new(&config).expect("Failed to build SMTP transport");
        Arc::new(mailer) as Arc<dyn TransactionalMailer>
    })
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
