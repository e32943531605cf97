use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::PostgresUserRepository;
use user_service::outbound::security::Argon2PasswordEncryptor;
use user_service::outbound::security::JwtUserTokenProvider;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        request_timeout_seconds = config.server.request_timeout_seconds,
        jwt_issuer = %config.jwt.issuer,
        jwt_expires_seconds = config.jwt.expires_seconds,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let jwt_handler = config.jwt.handler()?;
    tracing::info!(algorithm = ?jwt_handler.algorithm(), "Token signer configured");

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool));
    let encryptor = Arc::new(Argon2PasswordEncryptor::new());
    let token_provider = Arc::new(JwtUserTokenProvider::new(
        jwt_handler,
        config.jwt.issuer.clone(),
        config.jwt.audience.clone(),
        config.jwt.expires_seconds,
    ));

    let user_service = Arc::new(
        UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&user_repository),
            encryptor,
            token_provider,
        )
        .with_port_deadline(Duration::from_secs(config.server.request_timeout_seconds)),
    );

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
