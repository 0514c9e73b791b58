//! User and purchase records.

use serde::Serialize;

use minimart_core::{ItemId, PurchaseId, Token, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Purchase
// ─────────────────────────────────────────────────────────────────────────────

/// One checkout event. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Purchase {
    id: PurchaseId,
    items: Vec<ItemId>,
}

impl Purchase {
    pub fn new(id: PurchaseId, items: Vec<ItemId>) -> Self {
        Self { id, items }
    }

    pub fn id(&self) -> PurchaseId {
        self.id
    }

    /// Item identifiers in the order they appeared in the checkout.
    pub fn items(&self) -> &[ItemId] {
        &self.items
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A registered account.
///
/// # States
/// - LoggedOut: `is_logged_in == false`, `token == None`
/// - LoggedIn: `is_logged_in == true`, `token == Some(..)`
///
/// Session fields only change through [`crate::UserDirectory`], which keeps
/// its token index in step with them. The password is never serialized.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    username: String,
    #[serde(skip_serializing)]
    password: String,
    is_logged_in: bool,
    token: Option<Token>,
    purchases: Vec<Purchase>,
}

impl User {
    /// A freshly registered user is already logged in.
    pub(crate) fn registered(id: UserId, username: String, password: String, token: Token) -> Self {
        Self {
            id,
            username,
            password,
            is_logged_in: true,
            token: Some(token),
            purchases: Vec::new(),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Plain equality; there is no hashing.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    /// Append a purchase to the history.
    pub fn record_purchase(&mut self, purchase: Purchase) {
        self.purchases.push(purchase);
    }

    /// Install a new token, returning the one it replaces.
    pub(crate) fn start_session(&mut self, token: Token) -> Option<Token> {
        self.is_logged_in = true;
        self.token.replace(token)
    }

    pub(crate) fn end_session(&mut self) -> Option<Token> {
        self.is_logged_in = false;
        self.token.take()
    }
}

impl core::fmt::Debug for User {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("is_logged_in", &self.is_logged_in)
            .field("token", &self.token)
            .field("purchases", &self.purchases)
            .finish_non_exhaustive()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::registered(
            UserId::new(42),
            "alice".to_string(),
            "pw1".to_string(),
            Token::from("t-1"),
        )
    }

    #[test]
    fn serialized_user_uses_schema_field_names() {
        let json = serde_json::to_value(alice()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "username": "alice",
                "isLoggedIn": true,
                "token": "t-1",
                "purchases": [],
            })
        );
    }

    #[test]
    fn password_is_never_serialized_or_debug_printed() {
        let user = alice();
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("pw1"));
        assert!(!format!("{user:?}").contains("pw1"));
    }

    #[test]
    fn ending_session_clears_token() {
        let mut user = alice();
        let old = user.end_session();
        assert_eq!(old, Some(Token::from("t-1")));
        assert!(!user.is_logged_in());
        assert!(user.token().is_none());

        let json = serde_json::to_value(&user).unwrap();
        assert!(json["token"].is_null());
    }

    #[test]
    fn purchases_keep_item_order() {
        let mut user = alice();
        user.record_purchase(Purchase::new(
            PurchaseId::new(9),
            vec![ItemId::from("67890"), ItemId::from("12345")],
        ));

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json["purchases"],
            serde_json::json!([{ "id": "9", "items": ["67890", "12345"] }])
        );
    }
}
