use crate::domain::features::CustomerFeatures;
use crate::domain::prediction::{ErrorEnvelope, ErrorPayload};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<CustomerFeatures>, JsonRejection>,
) -> impl IntoResponse {
    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let body = ErrorEnvelope {
                error: ErrorPayload {
                    code: "VALIDATION_ERROR".to_string(),
                    message: rejection.body_text(),
                    details: None,
                },
            };
            return (axum::http::StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response();
        }
    };

    match state.prediction_service.predict(&req) {
        Ok(result) => (axum::http::StatusCode::OK, Json(result)).into_response(),
        Err(e) => (e.status(), Json(e.envelope())).into_response(),
    }
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub version: String,
    pub feature_names: Vec<String>,
}

pub async fn model_info(State(state): State<AppState>) -> impl IntoResponse {
    let model = &state.prediction_service.model;
    let body = ModelInfo {
        version: model.version().to_string(),
        feature_names: model.feature_names().to_vec(),
    };
    (axum::http::StatusCode::OK, Json(body))
}

pub async fn health() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "ok")
}
