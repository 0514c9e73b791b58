//! Process-wide commerce store.
//!
//! One mutex guards both the user directory and the catalog, so every
//! operation observes and leaves a consistent pair. The lock is never held
//! across an `.await`.
//!
//! ```text
//! request ──► CommerceStore::op(&self)
//!               │ lock()
//!               ├─► UserDirectory / Catalog / checkout
//!               │ unlock
//!               └─► owned result (cloned out of the guard)
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use minimart_auth::{User, UserDirectory};
use minimart_core::{
    IdGenerator, RandomIds, RandomTokens, StoreResult, Token, TokenGenerator,
};
use minimart_inventory::{Catalog, Item};
use minimart_purchasing::{Order, checkout};

#[derive(Debug)]
struct StoreState {
    users: UserDirectory,
    catalog: Catalog,
}

/// Single owner of all store state, shared behind an `Arc`.
pub struct CommerceStore {
    state: Mutex<StoreState>,
    ids: Arc<dyn IdGenerator>,
    tokens: Arc<dyn TokenGenerator>,
}

impl CommerceStore {
    /// Seed catalog, random ids and random tokens.
    pub fn new() -> Self {
        Self::with_generators(Catalog::seeded(), Arc::new(RandomIds), Arc::new(RandomTokens))
    }

    pub fn with_generators(
        catalog: Catalog,
        ids: Arc<dyn IdGenerator>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            state: Mutex::new(StoreState {
                users: UserDirectory::new(),
                catalog,
            }),
            ids,
            tokens,
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    // Poisoning is recovered: every fallible step of an operation runs before
    // its first mutation, and the mutations themselves cannot panic.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Query `userProfile`.
    pub fn user_profile(&self, token: &Token) -> Option<User> {
        let state = self.lock();
        let user = state.users.find_by_token(token).cloned();
        if user.is_none() {
            tracing::debug!(token = %token.redacted(), "profile lookup: no session");
        }
        user
    }

    /// Query `items`.
    pub fn items(&self) -> Vec<Item> {
        self.lock().catalog.list()
    }

    /// Mutation `register`.
    pub fn register(&self, username: &str, password: &str) -> User {
        let mut state = self.lock();
        let user = state
            .users
            .register(username, password, self.ids.as_ref(), self.tokens.as_ref())
            .clone();
        tracing::info!(username, user_id = %user.id(), "user registered");
        user
    }

    /// Mutation `login`.
    pub fn login(&self, username: &str, password: &str) -> Option<User> {
        let mut state = self.lock();
        match state.users.login(username, password, self.tokens.as_ref()) {
            Some(user) => {
                tracing::info!(username, "login succeeded");
                Some(user.clone())
            }
            None => {
                tracing::info!(username, "login rejected");
                None
            }
        }
    }

    /// Mutation `logout`.
    pub fn logout(&self, token: &Token) -> StoreResult<bool> {
        let result = self.lock().users.logout(token);
        match &result {
            Ok(_) => tracing::info!(token = %token.redacted(), "logged out"),
            Err(e) => tracing::warn!(token = %token.redacted(), error = %e, "logout failed"),
        }
        result
    }

    /// Mutation `purchase`.
    pub fn purchase(&self, token: &Token, order: &Order) -> StoreResult<bool> {
        let mut guard = self.lock();
        let state = &mut *guard;
        match checkout(&mut state.users, &mut state.catalog, self.ids.as_ref(), token, order) {
            Ok(purchase) => {
                tracing::info!(
                    purchase_id = %purchase.id(),
                    items = purchase.items().len(),
                    "purchase recorded"
                );
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(order_id = %order.id, error = %e, "purchase failed");
                Err(e)
            }
        }
    }
}

impl Default for CommerceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for CommerceStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CommerceStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
