use std::sync::Arc;

use auth::Authenticator;
use sentinel_track::config::Config;
use sentinel_track::domain::authentication::service::AuthService;
use sentinel_track::domain::user::service::UserService;
use sentinel_track::inbound::http::router::create_router;
use sentinel_track::outbound::repositories::InMemoryUserRepository;
use sentinel_track::seed::seed_users;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// HS256 keys shorter than the hash output weaken the signature.
const RECOMMENDED_KEY_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentinel_track=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "sentinel-track",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    let signing_config = config.jwt.signing_config().map_err(|e| {
        tracing::error!(error = %e, "Invalid JWT configuration");
        e
    })?;

    if signing_config.key().len() < RECOMMENDED_KEY_BYTES {
        tracing::warn!(
            key_bytes = signing_config.key().len(),
            recommended = RECOMMENDED_KEY_BYTES,
            "JWT signing key is shorter than recommended"
        );
    }

    tracing::info!(
        http_port = config.server.http_port,
        jwt_issuer = %signing_config.issuer(),
        jwt_audience = %signing_config.audience(),
        jwt_expiry_minutes = signing_config.expiry().num_minutes(),
        jwt_leeway_seconds = signing_config.leeway().num_seconds(),
        seed_users = config.seed.users.len(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(signing_config));
    let user_repository = Arc::new(InMemoryUserRepository::new());

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));

    seed_users(user_service.as_ref(), &config.seed.users).await?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, auth_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
