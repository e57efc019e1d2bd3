use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use ride_payments::config::AppConfig;
use ride_payments::db::BookingStore;
use ride_payments::handlers;
use ride_payments::services::payments::stripe::StripeProcessor;
use ride_payments::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(
        !config.stripe_secret_key.is_empty(),
        "STRIPE_SECRET_KEY must be set"
    );

    let store = Arc::new(BookingStore::open(&config.database_url)?);
    tracing::info!("connected to booking database at {}", config.database_url);

    let payments = StripeProcessor::new(
        config.stripe_secret_key.clone(),
        config.stripe_api_base.clone(),
    );

    let state = Arc::new(AppState {
        store: Arc::clone(&store),
        config: config.clone(),
        payments: Box::new(payments),
    });

    let app = handlers::router(state)
        .layer(cors_layer(&config)?)
        .layer(TraceLayer::new_for_http());

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    match Arc::try_unwrap(store) {
        Ok(store) => store.close()?,
        Err(_) => tracing::warn!("booking store still referenced at shutdown; not closed explicitly"),
    }
    tracing::info!("server stopped");

    Ok(())
}

fn cors_layer(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| anyhow::anyhow!("invalid CORS origin {o:?}: {e}"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
