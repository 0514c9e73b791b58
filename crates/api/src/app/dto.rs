use serde::Deserialize;

use minimart_core::Token;
use minimart_purchasing::Order;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `login` and `register`.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

/// Body of `logout`.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub token: Token,
}

/// Query string of `userProfile`.
#[derive(Debug, Deserialize)]
pub struct ProfileQuery {
    pub token: Token,
}

/// Body of `purchase`.
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub token: Token,
    pub order: Order,
}
