use anyhow::Context;
use axum::routing::{get, post};
use axum::Router;
use risk_scoring_service::config::AppConfig;
use risk_scoring_service::model::artifact::ScoringModel;
use risk_scoring_service::service::prediction_service::PredictionService;
use risk_scoring_service::AppState;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cfg = AppConfig::from_env();

    let model = ScoringModel::load(&cfg.model_path)
        .with_context(|| format!("failed to load scoring model from {}", cfg.model_path))?;
    tracing::info!(
        version = model.version(),
        features = model.feature_names().len(),
        "scoring model loaded"
    );

    let state = AppState {
        prediction_service: PredictionService {
            model: Arc::new(model),
        },
    };

    let app = Router::new()
        .route(
            "/health",
            get(risk_scoring_service::http::handlers::predictions::health),
        )
        .route(
            "/predict",
            post(risk_scoring_service::http::handlers::predictions::predict),
        )
        .route(
            "/model",
            get(risk_scoring_service::http::handlers::predictions::model_info),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!("listening on {}", cfg.bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
