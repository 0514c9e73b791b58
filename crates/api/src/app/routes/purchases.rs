use std::sync::Arc;

use axum::{Json, extract::Extension, response::IntoResponse};

use minimart_infra::CommerceStore;

use crate::app::{dto, errors};
use crate::context::RequestContext;

/// Mutation `purchase`: decrement stock and record the purchase on the
/// token's user. Unknown tokens and items are 404s and change nothing.
pub async fn purchase(
    Extension(store): Extension<Arc<CommerceStore>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::PurchaseRequest>,
) -> axum::response::Response {
    match store.purchase(&body.token, &body.order) {
        Ok(done) => Json(done).into_response(),
        Err(e) => errors::store_error_to_response(e, &ctx),
    }
}
