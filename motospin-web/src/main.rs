//! motospin-web - MotoSpin web service
//!
//! Single binary serving the embedded UI, the motorcycle proxy route, the
//! spin operation, session management, and favorites.

use anyhow::Result;
use clap::Parser;
use motospin_common::config::{CliOverrides, Config};
use motospin_web::auth::{HttpIdentityProvider, IdentityProvider};
use motospin_web::provider::ProviderClient;
use motospin_web::store::SqliteStore;
use motospin_web::{build_router, AppState};
use std::sync::Arc;
use tracing::{info, warn};

/// MotoSpin web service
#[derive(Debug, Parser)]
#[command(name = "motospin-web", version)]
struct Args {
    /// Base URL of the motorcycle data provider
    #[arg(long)]
    provider_url: Option<String>,

    /// Data provider API key (otherwise read from MOTOSPIN_API_KEY per request)
    #[arg(long)]
    api_key: Option<String>,

    /// Base URL of the identity service
    #[arg(long)]
    identity_url: Option<String>,

    /// Path of the favorites database file
    #[arg(long)]
    database: Option<String>,

    /// Listen address, e.g. 127.0.0.1:5780
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber first
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting MotoSpin (motospin-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();
    let config = Arc::new(Config::resolve(CliOverrides {
        provider_url: args.provider_url,
        api_key: args.api_key,
        identity_url: args.identity_url,
        database_path: args.database,
        bind_address: args.bind,
    })?);

    info!("Data provider: {}", config.provider_url);
    if config.api_key.is_none() && std::env::var(motospin_common::config::API_KEY_ENV).is_err() {
        warn!(
            "No provider API key configured; motorcycle requests will fail until {} is set",
            motospin_common::config::API_KEY_ENV
        );
    }

    let store = SqliteStore::open(&config.database_path).await?;

    let identity: Option<Arc<dyn IdentityProvider>> = match &config.identity_url {
        Some(url) => {
            info!("Identity service: {}", url);
            Some(Arc::new(HttpIdentityProvider::new(url.clone())))
        }
        None => {
            warn!("No identity service configured; sign-in is unavailable");
            None
        }
    };

    let provider = Arc::new(ProviderClient::new(config.clone()));
    let state = AppState::new(config.clone(), provider, identity, Arc::new(store));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("motospin-web listening on http://{}", config.bind_address);
    info!("Health check: http://{}/health", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
