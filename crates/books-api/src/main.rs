use std::sync::Arc;

use books_api::api::{AppState, create_router};
use books_api::auth::JwtVerifier;
use books_api::config::AppConfig;
use books_api::infrastructure::RepositoryFactory;
use books_api::server::Server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(error.into());
        }
    }

    init_tracing();

    tracing::info!("Books API - Starting Server");

    let config = AppConfig::from_env()?;

    let repository = RepositoryFactory::new(config.repository.clone())
        .create()
        .await?;
    let verifier = Arc::new(JwtVerifier::from_secret(config.jwt_secret.as_bytes()));

    let state = AppState::new(repository, verifier, &config.public_url);
    tracing::info!(public_url = %config.public_url, "API description available at /api-docs/openapi.json");

    let router = create_router(state);

    Server::new(config.server).run(router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("books_api=debug,tower_http=debug,info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
