use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};

use pantry_infra::{ActionResult, DispatchError};

use crate::app::dto::{self, ActionResponse, InventoryResponse};
use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_items))
        .route("/items", post(add_item))
        .route("/items/:name", delete(remove_item))
        .route("/items/:name/increment", post(increment_item))
        .route("/items/:name/decrement", post(decrement_item))
}

/// Reload the list from the store and return it with the latest feedback.
pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    if let Err(e) = services.dispatcher.refresh().await {
        return errors::dispatch_error_to_response(e);
    }
    Json(InventoryResponse::from(services.dispatcher.snapshot())).into_response()
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let expiration_date = match dto::parse_expiration_date(body.expiration_date.as_deref()) {
        Ok(d) => d,
        Err(msg) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_date", msg),
    };

    let res = services
        .dispatcher
        .add_item(&body.name, &body.quantity.as_text(), expiration_date)
        .await;
    action_response(&services, StatusCode::CREATED, res)
}

pub async fn increment_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let res = services.dispatcher.increment(&name).await;
    action_response(&services, StatusCode::OK, res)
}

pub async fn decrement_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let res = services.dispatcher.decrement(&name).await;
    action_response(&services, StatusCode::OK, res)
}

pub async fn remove_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    let res = services.dispatcher.remove(&name).await;
    action_response(&services, StatusCode::OK, res)
}

fn action_response(
    services: &AppServices,
    status: StatusCode,
    res: Result<ActionResult, DispatchError>,
) -> axum::response::Response {
    match res {
        Ok(done) => (
            status,
            Json(ActionResponse::new(done, services.dispatcher.snapshot())),
        )
            .into_response(),
        Err(e) => errors::dispatch_error_to_response(e),
    }
}
