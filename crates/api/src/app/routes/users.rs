use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query},
    response::IntoResponse,
};

use minimart_auth::User;
use minimart_infra::CommerceStore;

use crate::app::{dto, errors};
use crate::context::RequestContext;

/// Query `userProfile`: `null` when no user holds the token.
pub async fn user_profile(
    Extension(store): Extension<Arc<CommerceStore>>,
    Query(query): Query<dto::ProfileQuery>,
) -> Json<Option<User>> {
    Json(store.user_profile(&query.token))
}

/// Mutation `register`: always succeeds, replacing any same-named account.
pub async fn register(
    Extension(store): Extension<Arc<CommerceStore>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> Json<User> {
    Json(store.register(&body.username, &body.password))
}

/// Mutation `login`: `null` on unknown user or wrong password.
pub async fn login(
    Extension(store): Extension<Arc<CommerceStore>>,
    Json(body): Json<dto::CredentialsRequest>,
) -> Json<Option<User>> {
    Json(store.login(&body.username, &body.password))
}

/// Mutation `logout`.
pub async fn logout(
    Extension(store): Extension<Arc<CommerceStore>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<dto::TokenRequest>,
) -> axum::response::Response {
    match store.logout(&body.token) {
        Ok(done) => Json(done).into_response(),
        Err(e) => errors::store_error_to_response(e, &ctx),
    }
}
