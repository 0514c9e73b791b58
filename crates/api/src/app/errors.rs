use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use minimart_core::StoreError;

use crate::context::RequestContext;

/// Missing tokens and items map to 404; a stock overflow is a 422.
pub fn store_error_to_response(err: StoreError, ctx: &RequestContext) -> axum::response::Response {
    let status = match err {
        StoreError::UnknownToken | StoreError::UnknownItem(_) => StatusCode::NOT_FOUND,
        StoreError::QuantityOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    json_error(status, err.code(), err.to_string(), ctx)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
    ctx: &RequestContext,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
            "request_id": ctx.request_id(),
        })),
    )
        .into_response()
}
