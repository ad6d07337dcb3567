//! HTTP surface of the predictor.
//!
//! Read-only JSON endpoints per feed type plus a plaintext banner at `/`.
//! Every failure, including a panicking handler, is turned into
//! `500 {"error": <message>}` at this boundary.

use crate::application::prediction_service::PredictionService;
use crate::domain::errors::{PredictionError, SERVER_ERROR_MESSAGE};
use crate::domain::game::FeedType;
use crate::domain::history::HistoryReport;
use crate::domain::prediction::{Prediction, RoundForecast};
use axum::extract::{Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use futures_util::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PredictionService>,
    pub banner: Arc<str>,
}

impl AppState {
    pub fn new(service: PredictionService, banner: impl Into<Arc<str>>) -> Self {
        Self {
            service: Arc::new(service),
            banner: banner.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Error response carrying a localized message.
#[derive(Debug)]
pub struct ApiFailure {
    status: StatusCode,
    message: &'static str,
}

impl ApiFailure {
    pub fn server_error() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: SERVER_ERROR_MESSAGE,
        }
    }
}

impl From<PredictionError> for ApiFailure {
    fn from(err: PredictionError) -> Self {
        error!("HTTP: request failed: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.user_message(),
        }
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/hu", get(predict_hu))
        .route("/md5", get(predict_md5))
        .route("/hu/lichsu", get(history_hu))
        .route("/md5/lichsu", get(history_md5))
        .route("/hu/analysis", get(analysis_hu))
        .route("/md5/analysis", get(analysis_md5))
        .layer(middleware::from_fn(catch_panic))
        .with_state(state)
}

async fn catch_panic(request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            error!("HTTP: handler for {} panicked", path);
            ApiFailure::server_error().into_response()
        }
    }
}

/// Paths served by `router`, for startup logging.
pub const ENDPOINTS: [(&str, &str); 7] = [
    ("/", "Homepage"),
    ("/hu", "Dự đoán Tài Xỉu Hũ"),
    ("/md5", "Dự đoán Tài Xỉu MD5"),
    ("/hu/lichsu", "Lịch sử dự đoán Hũ"),
    ("/md5/lichsu", "Lịch sử dự đoán MD5"),
    ("/hu/analysis", "Phân tích chi tiết Hũ"),
    ("/md5/analysis", "Phân tích chi tiết MD5"),
];

async fn banner(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        state.banner.to_string(),
    )
}

async fn predict(state: &AppState, feed: FeedType) -> Result<Json<RoundForecast>, ApiFailure> {
    Ok(Json(state.service.predict_next(feed).await?))
}

async fn analysis(state: &AppState, feed: FeedType) -> Result<Json<Prediction>, ApiFailure> {
    Ok(Json(state.service.analyze(feed).await?))
}

async fn history(state: &AppState, feed: FeedType) -> Json<HistoryReport> {
    Json(state.service.history(feed).await)
}

async fn predict_hu(State(state): State<AppState>) -> Result<Json<RoundForecast>, ApiFailure> {
    predict(&state, FeedType::Hu).await
}

async fn predict_md5(State(state): State<AppState>) -> Result<Json<RoundForecast>, ApiFailure> {
    predict(&state, FeedType::Md5).await
}

async fn history_hu(State(state): State<AppState>) -> Json<HistoryReport> {
    history(&state, FeedType::Hu).await
}

async fn history_md5(State(state): State<AppState>) -> Json<HistoryReport> {
    history(&state, FeedType::Md5).await
}

async fn analysis_hu(State(state): State<AppState>) -> Result<Json<Prediction>, ApiFailure> {
    analysis(&state, FeedType::Hu).await
}

async fn analysis_md5(State(state): State<AppState>) -> Result<Json<Prediction>, ApiFailure> {
    analysis(&state, FeedType::Md5).await
}
