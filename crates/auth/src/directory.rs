//! User directory: accounts keyed by username, plus a token index.

use std::collections::HashMap;

use minimart_core::{IdGenerator, StoreError, StoreResult, Token, TokenGenerator, UserId};

use crate::user::User;

/// In-memory account store.
///
/// `by_token` maps every live token to the username holding it. Entries are
/// added on register/login and dropped whenever the token is replaced,
/// cleared, or its record is overwritten.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
    by_token: HashMap<Token, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }

    /// Create a logged-in account, silently replacing any existing one with
    /// the same username. No validation is performed.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        ids: &dyn IdGenerator,
        tokens: &dyn TokenGenerator,
    ) -> &User {
        let token = tokens.next_token();
        let user = User::registered(
            UserId::new(ids.next_id()),
            username.to_string(),
            password.to_string(),
            token.clone(),
        );

        if let Some(previous) = self.users.insert(username.to_string(), user) {
            tracing::debug!(username, "registration replaced existing account");
            if let Some(stale) = previous.token() {
                self.forget_token(stale, username);
            }
        }
        self.by_token.insert(token, username.to_string());

        &self.users[username]
    }

    /// Refresh the session of `username` if `password` matches.
    ///
    /// Unknown user and wrong password both return `None`.
    pub fn login(
        &mut self,
        username: &str,
        password: &str,
        tokens: &dyn TokenGenerator,
    ) -> Option<&User> {
        let user = self.users.get_mut(username)?;
        if !user.password_matches(password) {
            return None;
        }

        let token = tokens.next_token();
        if let Some(stale) = user.start_session(token.clone()) {
            self.forget_token(&stale, username);
        }
        self.by_token.insert(token, username.to_string());

        self.users.get(username)
    }

    /// End the session holding `token`.
    pub fn logout(&mut self, token: &Token) -> StoreResult<bool> {
        let username = self.by_token.remove(token).ok_or(StoreError::UnknownToken)?;
        let user = self
            .users
            .get_mut(&username)
            .ok_or(StoreError::UnknownToken)?;
        user.end_session();
        Ok(true)
    }

    pub fn find_by_token(&self, token: &Token) -> Option<&User> {
        let username = self.by_token.get(token)?;
        self.users.get(username)
    }

    pub fn find_by_token_mut(&mut self, token: &Token) -> Option<&mut User> {
        let username = self.by_token.get(token)?;
        self.users.get_mut(username)
    }

    fn forget_token(&mut self, token: &Token, username: &str) {
        if self.by_token.get(token).map(String::as_str) == Some(username) {
            self.by_token.remove(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minimart_core::{SequentialIds, SequentialTokens};
    use proptest::prelude::*;

    fn generators() -> (SequentialIds, SequentialTokens) {
        (SequentialIds::cycle([11, 22, 33]), SequentialTokens::default())
    }

    #[test]
    fn register_logs_user_in() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();

        let user = dir.register("alice", "pw1", &ids, &tokens);
        assert_eq!(user.id(), UserId::new(11));
        assert_eq!(user.username(), "alice");
        assert!(user.is_logged_in());
        assert_eq!(user.token(), Some(&Token::from("token-1")));
        assert!(user.purchases().is_empty());
    }

    #[test]
    fn registering_twice_overwrites_and_changes_token() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();

        let first = dir.register("alice", "pw1", &ids, &tokens).token().cloned().unwrap();
        let second = dir.register("alice", "pw2", &ids, &tokens).token().cloned().unwrap();

        assert_ne!(first, second);
        assert_eq!(dir.len(), 1);
        assert!(dir.find_by_token(&first).is_none());
        assert!(dir.login("alice", "pw1", &tokens).is_none());
        assert!(dir.login("alice", "pw2", &tokens).is_some());
    }

    #[test]
    fn login_refreshes_token() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();
        let before = dir.register("alice", "pw1", &ids, &tokens).token().cloned().unwrap();

        let user = dir.login("alice", "pw1", &tokens).unwrap();
        assert!(user.is_logged_in());
        let after = user.token().cloned().unwrap();
        assert_ne!(before, after);

        // Old token no longer resolves.
        assert!(dir.find_by_token(&before).is_none());
        assert_eq!(dir.find_by_token(&after).unwrap().username(), "alice");
    }

    #[test]
    fn login_with_bad_credentials_returns_none() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();
        dir.register("alice", "pw1", &ids, &tokens);

        assert!(dir.login("alice", "wrong", &tokens).is_none());
        assert!(dir.login("nobody", "pw1", &tokens).is_none());
    }

    #[test]
    fn logout_clears_session() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();
        let token = dir.register("alice", "pw1", &ids, &tokens).token().cloned().unwrap();

        assert_eq!(dir.logout(&token), Ok(true));
        assert!(dir.find_by_token(&token).is_none());

        let user = dir.get("alice").unwrap();
        assert!(!user.is_logged_in());
        assert!(user.token().is_none());
    }

    #[test]
    fn logout_with_unknown_token_is_an_error() {
        let mut dir = UserDirectory::new();
        assert_eq!(dir.logout(&Token::from("nope")), Err(StoreError::UnknownToken));
    }

    #[test]
    fn stale_token_cannot_logout_twice() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();
        let token = dir.register("alice", "pw1", &ids, &tokens).token().cloned().unwrap();

        dir.logout(&token).unwrap();
        assert_eq!(dir.logout(&token), Err(StoreError::UnknownToken));
    }

    #[test]
    fn login_after_logout_starts_new_session() {
        let (ids, tokens) = generators();
        let mut dir = UserDirectory::new();
        let token = dir.register("alice", "pw1", &ids, &tokens).token().cloned().unwrap();
        dir.logout(&token).unwrap();

        let user = dir.login("alice", "pw1", &tokens).unwrap();
        assert!(user.is_logged_in());
        assert_ne!(user.token(), Some(&token));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Register(usize),
        Login(usize),
        Logout(usize),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::Register),
            (0usize..4).prop_map(Op::Login),
            (0usize..4).prop_map(Op::Logout),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: after any sequence of operations, a token resolves to a
        /// user iff that user is logged in and currently holds it.
        #[test]
        fn token_index_matches_user_records(ops in prop::collection::vec(op(), 1..40)) {
            let (ids, tokens) = generators();
            let mut dir = UserDirectory::new();
            let names = ["ann", "bob", "cid", "dee"];

            for op in ops {
                match op {
                    Op::Register(i) => {
                        dir.register(names[i], "pw", &ids, &tokens);
                    }
                    Op::Login(i) => {
                        dir.login(names[i], "pw", &tokens);
                    }
                    Op::Logout(i) => {
                        if let Some(token) = dir.get(names[i]).and_then(|u| u.token()).cloned() {
                            prop_assert_eq!(dir.logout(&token), Ok(true));
                        }
                    }
                }
            }

            prop_assert_eq!(
                dir.by_token.len(),
                dir.users.values().filter(|u| u.token().is_some()).count()
            );
            for user in dir.users.values() {
                prop_assert_eq!(user.is_logged_in(), user.token().is_some());
                if let Some(token) = user.token() {
                    let found = dir.find_by_token(token).map(User::username);
                    prop_assert_eq!(found, Some(user.username()));
                }
            }
        }
    }
}
