use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};

use archflow::api::{self, AppState};
use archflow::config::CONFIG;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,archflow=debug".into()),
        )
        .with_target(false)
        .init();

    tracing::info!("Starting archflow backend");

    let state = AppState::from_config(&CONFIG);

    let origin = if CONFIG.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            CONFIG
                .cors_origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = api::router(state).layer(cors);

    let addr = format!("{}:{}", CONFIG.host, CONFIG.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("archflow listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
