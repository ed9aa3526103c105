use std::sync::Arc;
use std::time::Duration;

use account_service::account::ports::AccountServicePort;
use account_service::account::service::AccountService;
use account_service::config::Config;
use account_service::contact::ports::ContactServicePort;
use account_service::contact::service::ContactService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::email::RelayEmailNotifier;
use account_service::outbound::repositories::PostgresContactRepository;
use account_service::outbound::repositories::PostgresUserRepository;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_days = config.jwt.expiration_days,
        email_relay = %config.email.relay_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs))
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        acquire_timeout_secs = config.database.acquire_timeout_secs,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let contact_repository = Arc::new(PostgresContactRepository::new(pg_pool));
    let email_notifier = Arc::new(RelayEmailNotifier::new(&config.email)?);

    let account_service: Arc<dyn AccountServicePort> = Arc::new(AccountService::new(
        user_repository,
        Arc::clone(&authenticator),
        chrono::Duration::days(config.jwt.expiration_days),
    ));
    let contact_service: Arc<dyn ContactServicePort> =
        Arc::new(ContactService::new(contact_repository, email_notifier));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(account_service, contact_service, authenticator);
    axum::serve(http_listener, application).await?;

    Ok(())
}
