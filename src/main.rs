use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use greenglo::config::AppConfig;
use greenglo::cors;
use greenglo::handlers;
use greenglo::services::payments::stripe::StripeProcessor;
use greenglo::site::ServiceCatalog;
use greenglo::state::AppState;

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

    let catalog = ServiceCatalog::load(config.service_map_path.as_deref())?;
    tracing::info!(services = catalog.len(), "loaded image service map");
    tracing::info!(origins = ?config.allowed_origins, "allowed origins");

    let processor = StripeProcessor::new(
        config.stripe_secret_key.clone(),
        config.stripe_api_base.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        processor: Box::new(processor),
        catalog: Arc::new(catalog),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/service-map", get(handlers::site::service_map))
        .route(
            "/create-payment-intent",
            post(handlers::payments::create_payment_intent)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/confirm-booking",
            post(handlers::payments::confirm_booking).fallback(handlers::method_not_allowed),
        )
        .route(
            "/create-checkout-session",
            post(handlers::checkout::create_checkout_session)
                .fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::unknown_route)
        .layer(middleware::from_fn_with_state(state.clone(), cors::gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
