//! terminal-checkout HTTP Server
//!
//! Axum-based server exposing the checkout and subscription-record
//! endpoints, backed by MongoDB and the Razorpay gateway, and serving
//! the WASM frontend as static files.

mod handlers;
mod state;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_payments::RazorpayClient;
use checkout_store::MongoSubscriptionStore;

use crate::handlers::{
    annual_checkout, direct_checkout, health_check, monthly_checkout, save_subscription,
    update_subscription, widget_config,
};
use crate::state::AppState;

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & frontend config
        .route("/health", get(health_check))
        .route("/api/config", get(widget_config))
        // Checkout
        .route("/api/direct", post(direct_checkout))
        .route("/api/monthly", post(monthly_checkout))
        .route("/api/annual", post(annual_checkout))
        // Subscription records
        .route("/api/save-subscription", post(save_subscription))
        .route("/api/update-subscription", post(update_subscription))
        // Static files (WASM frontend)
        .fallback_service(tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Connect the document store; a missing URI or unreachable server is fatal
    let uri = std::env::var("MONGODB_URI").context("MONGODB_URI must be set")?;
    let database = std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "checkout".into());
    let store = MongoSubscriptionStore::connect(&uri, &database)
        .await
        .context("MongoDB connection error")?;

    // Gateway credentials and plan ids are likewise required at startup
    let razorpay = RazorpayClient::from_env().context("Razorpay configuration error")?;
    let widget_key_id =
        std::env::var("RAZORPAY_KEY_ID").context("RAZORPAY_KEY_ID must be set")?;
    tracing::info!("✓ Razorpay configured");

    let state = AppState {
        store: Arc::new(store),
        razorpay: Arc::new(razorpay),
        widget_key_id,
    };

    let app = router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 terminal-checkout server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                   - Health check");
    tracing::info!("  GET  /api/config               - Widget key for the frontend");
    tracing::info!("  POST /api/direct               - One-time lifetime order");
    tracing::info!("  POST /api/monthly              - Monthly subscription");
    tracing::info!("  POST /api/annual               - Annual subscription");
    tracing::info!("  POST /api/save-subscription    - Pre-save record (unpaid)");
    tracing::info!("  POST /api/update-subscription  - Mark record paid");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
