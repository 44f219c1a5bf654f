//! Carebook server binary.
//!
//! Boots the REST API: loads environment configuration, opens the document
//! store, runs the one-time doctor seed and serves the router with
//! Swagger UI.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_rest::{router, ApiDoc, AppState};
use carebook_core::{seed::seed_doctors, CoreConfig, DocumentStore};

/// Main entry point for the Carebook REST server.
///
/// # Environment Variables
/// - `CAREBOOK_REST_ADDR`: server address (default: "0.0.0.0:9000")
/// - `CAREBOOK_DATA_DIR`: document store root (default: "./carebook_data")
/// - `DOCTOR_PASSWORD`: shared doctor login secret (required)
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - `DOCTOR_PASSWORD` is missing or empty,
/// - the store root cannot be created,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("carebook_core=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("CAREBOOK_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:9000".into());
    let data_dir = std::env::var("CAREBOOK_DATA_DIR").unwrap_or_else(|_| "./carebook_data".into());
    let doctor_password = std::env::var("DOCTOR_PASSWORD")
        .map_err(|_| anyhow::anyhow!("DOCTOR_PASSWORD must be set"))?;

    let cfg = Arc::new(CoreConfig::new(PathBuf::from(&data_dir), doctor_password)?);
    let store = DocumentStore::open(cfg.data_dir())?;

    let seeded = seed_doctors(&store)?;
    if seeded > 0 {
        tracing::info!("seeded {seeded} doctors into {}", cfg.data_dir().display());
    }

    tracing::info!("++ Starting Carebook REST on {}", addr);

    let app = router(AppState { store, cfg })
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
