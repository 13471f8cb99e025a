use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{Receipt, ReceiptId};
use super::repository::ReceiptStore;
use super::service::ReceiptPointsService;

/// Router builder exposing the receipt processing and points lookup endpoints.
///
/// Every response produced here, including unmatched paths, is JSON.
pub fn receipt_router<S>(service: Arc<ReceiptPointsService<S>>) -> Router
where
    S: ReceiptStore + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_handler::<S>))
        .route("/receipts/:receipt_id/points", get(points_handler::<S>))
        .fallback(not_found_handler)
        .layer(middleware::map_response(json_content_type))
        .with_state(service)
}

/// Ids are matched by the same `[0-9a-f-]+` pattern the route advertises.
fn is_receipt_id(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b) || b == b'-')
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({
        "error": message.into(),
    });
    (status, Json(payload)).into_response()
}

pub(crate) async fn process_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    body: Bytes,
) -> Response
where
    S: ReceiptStore + 'static,
{
    // Any undecodable body is a 400, whatever the request content type.
    let receipt: Receipt = match serde_json::from_slice(&body) {
        Ok(receipt) => receipt,
        Err(err) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("invalid receipt payload: {err}"),
            )
        }
    };

    match service.process(receipt) {
        Ok(record) => (StatusCode::OK, Json(json!({ "id": record.id }))).into_response(),
        Err(err) if err.is_invalid_payload() => {
            error_response(StatusCode::BAD_REQUEST, format!("invalid receipt: {err}"))
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

pub(crate) async fn points_handler<S>(
    State(service): State<Arc<ReceiptPointsService<S>>>,
    Path(receipt_id): Path<String>,
) -> Response
where
    S: ReceiptStore + 'static,
{
    if !is_receipt_id(&receipt_id) {
        return error_response(StatusCode::NOT_FOUND, "no receipt found for that id");
    }

    let id = ReceiptId(receipt_id);
    match service.points(&id) {
        Ok(record) => (StatusCode::OK, Json(json!({ "points": record.points }))).into_response(),
        Err(err) if err.is_not_found() => {
            error_response(StatusCode::NOT_FOUND, "no receipt found for that id")
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "not found")
}

async fn json_content_type(mut response: Response) -> Response {
    // axum's 405 has an empty body; swap in a JSON one and keep the `Allow` header.
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        let allow = response.headers_mut().remove(header::ALLOW);
        response = error_response(StatusCode::METHOD_NOT_ALLOWED, "method not allowed");
        if let Some(allow) = allow {
            response.headers_mut().insert(header::ALLOW, allow);
        }
    }
    response
        .headers_mut()
        .entry(header::CONTENT_TYPE)
        .or_insert(HeaderValue::from_static("application/json"));
    response
}
