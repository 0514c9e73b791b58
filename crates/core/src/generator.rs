//! Identifier and token generation capabilities.
//!
//! The store never calls a random source directly; it is handed an
//! [`IdGenerator`] and a [`TokenGenerator`] so tests can substitute
//! deterministic sequences.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rand::{Rng, distributions::Alphanumeric};

use crate::id::Token;

/// Inclusive upper bound of randomly drawn user/purchase ids.
pub const MAX_RANDOM_ID: u32 = 100_000;

/// Base62 characters needed for ~256 bits of entropy.
pub const TOKEN_LEN: usize = 43;

/// Source of numeric identifiers for users and purchases.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> u32;
}

/// Source of session tokens. Values are expected to be unique in practice.
pub trait TokenGenerator: Send + Sync {
    fn next_token(&self) -> Token;
}

impl<G> IdGenerator for Arc<G>
where
    G: IdGenerator + ?Sized,
{
    fn next_id(&self) -> u32 {
        (**self).next_id()
    }
}

impl<G> TokenGenerator for Arc<G>
where
    G: TokenGenerator + ?Sized,
{
    fn next_token(&self) -> Token {
        (**self).next_token()
    }
}

/// Uniform random ids in `0..=MAX_RANDOM_ID`. Collisions are possible.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&self) -> u32 {
        rand::thread_rng().gen_range(0..=MAX_RANDOM_ID)
    }
}

/// Random base62 tokens of [`TOKEN_LEN`] characters.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokens;

impl TokenGenerator for RandomTokens {
    fn next_token(&self) -> Token {
        let raw: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        Token::new(raw)
    }
}

/// Deterministic ids cycling through a fixed list of values.
#[derive(Debug)]
pub struct SequentialIds {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequentialIds {
    /// Yields `values` in order, wrapping around at the end.
    ///
    /// An empty list yields `0` forever.
    pub fn cycle(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values.get(idx).copied().unwrap_or_default()
    }
}

/// Deterministic tokens: `{prefix}-1`, `{prefix}-2`, ...
#[derive(Debug)]
pub struct SequentialTokens {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialTokens {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl Default for SequentialTokens {
    fn default() -> Self {
        Self::new("token")
    }
}

impl TokenGenerator for SequentialTokens {
    fn next_token(&self) -> Token {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        Token::new(format!("{}-{}", self.prefix, n))
    }
}
