//! Server-side session storage.
//!
//! Sessions map an opaque random token to a full [`User`] snapshot taken at
//! login time. The snapshot is deliberate: a profile change elsewhere does
//! not show up until the user logs in again. Tokens are keyed in the store
//! by an HMAC of the configured session secret, never raw.

use std::collections::HashMap;

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use tokio::sync::RwLock;

use crate::auth::repo::User;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "sid";

/// Token byte length before hex encoding (32 bytes = 64 hex chars).
const TOKEN_BYTES: usize = 32;

/// Generate a fresh opaque session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Token -> identity-snapshot mapping, injected so handlers and tests never
/// depend on a concrete session backend.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Bind a token to an identity snapshot. Called once per login.
    async fn insert(&self, token: &str, user: User);
    /// Resolve a token; `None` means unauthenticated.
    async fn get(&self, token: &str) -> Option<User>;
    /// Destroy a session. Unknown tokens are a no-op.
    async fn remove(&self, token: &str);
}

/// Process-local session store.
pub struct MemorySessionStore {
    secret: Vec<u8>,
    sessions: RwLock<HashMap<String, User>>,
}

impl MemorySessionStore {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn key_for(&self, token: &str) -> String {
        // HMAC-SHA256 accepts keys of any length, so this cannot fail.
        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret).expect("hmac key");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, token: &str, user: User) {
        self.sessions.write().await.insert(self.key_for(token), user);
    }

    async fn get(&self, token: &str) -> Option<User> {
        self.sessions.read().await.get(&self.key_for(token)).cloned()
    }

    async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(&self.key_for(token));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use uuid::Uuid;

    fn sample_user(name: &str, email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            password_hash: "$argon2id$fake".into(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn tokens_are_long_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn insert_then_get_returns_snapshot() {
        let store = MemorySessionStore::new("secret");
        let user = sample_user("Alice", "a@x.com");
        let token = generate_token();
        store.insert(&token, user.clone()).await;

        let got = store.get(&token).await.expect("session should resolve");
        assert_eq!(got.id, user.id);
        assert_eq!(got.email, "a@x.com");
    }

    #[tokio::test]
    async fn remove_destroys_the_session() {
        let store = MemorySessionStore::new("secret");
        let token = generate_token();
        store.insert(&token, sample_user("Alice", "a@x.com")).await;

        store.remove(&token).await;
        assert!(store.get(&token).await.is_none());
    }

    #[tokio::test]
    async fn unknown_token_resolves_to_none() {
        let store = MemorySessionStore::new("secret");
        store
            .insert(&generate_token(), sample_user("Alice", "a@x.com"))
            .await;
        assert!(store.get(&generate_token()).await.is_none());
    }

    #[tokio::test]
    async fn sessions_are_isolated_per_token() {
        let store = MemorySessionStore::new("secret");
        let (ta, tb) = (generate_token(), generate_token());
        store.insert(&ta, sample_user("Alice", "a@x.com")).await;
        store.insert(&tb, sample_user("Bob", "b@x.com")).await;

        store.remove(&ta).await;
        assert!(store.get(&ta).await.is_none());
        assert_eq!(store.get(&tb).await.expect("bob stays").name, "Bob");
    }
}
