use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use pantry_infra::{DispatchError, StoreError};
use pantry_inventory::report;

/// Map a failed action to a JSON error. The message is the same feedback line
/// the UI shows; backend details stay in the logs.
pub fn dispatch_error_to_response(err: DispatchError) -> axum::response::Response {
    let message = report(&err.outcome());
    match err {
        DispatchError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DispatchError::InvariantViolation(_) => {
            json_error(StatusCode::BAD_REQUEST, "invariant_violation", message)
        }
        DispatchError::Store(StoreError::Unavailable(_)) => {
            json_error(StatusCode::SERVICE_UNAVAILABLE, "store_unavailable", message)
        }
        DispatchError::Store(StoreError::Decode { .. } | StoreError::Encode { .. }) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", message)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
