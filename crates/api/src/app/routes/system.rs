use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode};

use crate::app::dto::FeedbackResponse;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Latest feedback line, without touching the store.
pub async fn feedback(Extension(services): Extension<Arc<AppServices>>) -> Json<FeedbackResponse> {
    Json(FeedbackResponse {
        feedback: services.dispatcher.feedback(),
    })
}
