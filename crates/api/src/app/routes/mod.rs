use axum::{
    Router,
    routing::{get, post},
};

pub mod items;
pub mod purchases;
pub mod system;
pub mod users;

/// Router for every query and mutation.
pub fn router() -> Router {
    Router::new()
        .route("/items", get(items::items))
        .route("/user-profile", get(users::user_profile))
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/logout", post(users::logout))
        .route("/purchase", post(purchases::purchase))
}
