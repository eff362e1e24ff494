use std::sync::Arc;

use axum::{Json, Router, extract::Extension, routing::post};

use crate::app::dto::{self, VoiceResponse};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/commands", post(submit_transcript))
}

/// Run one finalized transcript. Always 200: failures come back as feedback.
pub async fn submit_transcript(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::VoiceCommandRequest>,
) -> Json<VoiceResponse> {
    let report = services.dispatcher.handle_transcript(&body.transcript).await;
    Json(VoiceResponse::new(report, services.dispatcher.snapshot()))
}
