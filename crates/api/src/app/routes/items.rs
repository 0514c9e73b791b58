use std::sync::Arc;

use axum::{Json, extract::Extension};

use minimart_infra::CommerceStore;
use minimart_inventory::Item;

/// Query `items`: the whole catalog in listing order.
pub async fn items(Extension(store): Extension<Arc<CommerceStore>>) -> Json<Vec<Item>> {
    Json(store.items())
}
