use std::sync::Arc;

use auth::PasswordHasher;
use auth::TokenAuthority;
use sqlx::postgres::PgPoolOptions;
use todo_service::account::service::AccountService;
use todo_service::config::Config;
use todo_service::inbound::http::router::create_router;
use todo_service::repositories::PostgresAccountRepository;
use todo_service::repositories::PostgresTodoRepository;
use todo_service::todo::service::TodoService;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_ttl_seconds = config.jwt.access_token_ttl_seconds,
        refresh_token_ttl_seconds = config.jwt.refresh_token_ttl_seconds,
        enforce_token_type = config.jwt.enforce_token_type,
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

    let password_hasher = PasswordHasher::with_cost(config.password.hash_cost)?;
    let token_authority = Arc::new(TokenAuthority::new(
        config.jwt.secret.as_bytes(),
        config.jwt.token_settings(),
    ));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let todo_repository = Arc::new(PostgresTodoRepository::new(pg_pool));

    let account_service = Arc::new(AccountService::new(account_repository, password_hasher));
    let todo_service = Arc::new(TodoService::new(todo_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        todo_service,
        token_authority,
        config.cookie.clone(),
    );

    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
