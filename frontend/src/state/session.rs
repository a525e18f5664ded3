use std::cell::RefCell;
use std::rc::Rc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use thiserror::Error;

use crate::api::User;

pub const TOKEN_KEY: &str = "auth_token";
pub const USER_KEY: &str = "user_info";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("browser storage is unavailable")]
    Unavailable,
    #[error("failed to write `{0}` to storage")]
    Write(&'static str),
    #[error("failed to encode user profile: {0}")]
    Encode(String),
}

/// Token plus cached profile for the signed-in user.
///
/// Implementations drop a token whose JWT `exp` is in the past, so callers
/// never observe an expired session.
pub trait SessionStore {
    fn get_token(&self) -> Option<String>;
    fn get_current_user(&self) -> Option<User>;
    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError>;
    fn clear_session(&self);

    fn is_authenticated(&self) -> bool {
        self.get_token().is_some()
    }
}

/// Reads the `exp` claim of a JWT. Opaque tokens yield `None`.
pub fn token_expiry(token: &str) -> Option<i64> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.get("exp")?.as_i64()
}

pub fn is_token_expired(token: &str, now_epoch_secs: i64) -> bool {
    token_expiry(token).is_some_and(|exp| exp <= now_epoch_secs)
}

fn live_token(store: &dyn SessionStore, raw: Option<String>) -> Option<String> {
    let token = raw.filter(|t| !t.trim().is_empty())?;
    if is_token_expired(&token, Utc::now().timestamp()) {
        log::info!("stored session token expired; clearing session");
        store.clear_session();
        return None;
    }
    Some(token)
}

#[derive(Default)]
pub struct MemorySessionStore {
    token: RefCell<Option<String>>,
    user: RefCell<Option<User>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(token: impl Into<String>, user: User) -> Self {
        Self {
            token: RefCell::new(Some(token.into())),
            user: RefCell::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get_token(&self) -> Option<String> {
        let raw = self.token.borrow().clone();
        live_token(self, raw)
    }

    fn get_current_user(&self) -> Option<User> {
        self.get_token()?;
        self.user.borrow().clone()
    }

    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError> {
        *self.token.borrow_mut() = Some(token.to_string());
        *self.user.borrow_mut() = Some(user.clone());
        Ok(())
    }

    fn clear_session(&self) {
        self.token.borrow_mut().take();
        self.user.borrow_mut().take();
    }
}

#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserSessionStore;

#[cfg(target_arch = "wasm32")]
impl SessionStore for BrowserSessionStore {
    fn get_token(&self) -> Option<String> {
        let raw = crate::utils::storage::local_storage()
            .ok()
            .and_then(|storage| storage.get_item(TOKEN_KEY).ok().flatten());
        live_token(self, raw)
    }

    fn get_current_user(&self) -> Option<User> {
        self.get_token()?;
        let raw = crate::utils::storage::local_storage()
            .ok()?
            .get_item(USER_KEY)
            .ok()
            .flatten()?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("discarding unreadable cached user: {}", err);
                None
            }
        }
    }

    fn set_session(&self, token: &str, user: &User) -> Result<(), SessionError> {
        let storage = crate::utils::storage::local_storage()?;
        let encoded =
            serde_json::to_string(user).map_err(|e| SessionError::Encode(e.to_string()))?;
        storage
            .set_item(TOKEN_KEY, token)
            .map_err(|_| SessionError::Write(TOKEN_KEY))?;
        storage
            .set_item(USER_KEY, &encoded)
            .map_err(|_| SessionError::Write(USER_KEY))?;
        Ok(())
    }

    fn clear_session(&self) {
        if let Ok(storage) = crate::utils::storage::local_storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }
}

/// `localStorage` in the browser, process memory elsewhere.
pub fn default_session_store() -> Rc<dyn SessionStore> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(BrowserSessionStore)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(MemorySessionStore::new())
    }
}

#[cfg(test)]
pub(crate) fn jwt_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"ada@example.com","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::regular_user;

    #[test]
    fn memory_store_round_trips_session() {
        let store = MemorySessionStore::new();
        assert!(!store.is_authenticated());
        assert!(store.get_current_user().is_none());

        store.set_session("opaque-token", &regular_user()).unwrap();
        assert!(store.is_authenticated());
        assert_eq!(store.get_token().as_deref(), Some("opaque-token"));
        assert_eq!(store.get_current_user().map(|u| u.id), Some(regular_user().id));

        store.clear_session();
        assert!(!store.is_authenticated());
        assert!(store.get_current_user().is_none());
    }

    #[test]
    fn expired_token_clears_session() {
        let expired = jwt_with_exp(Utc::now().timestamp() - 60);
        let store = MemorySessionStore::with_session(expired, regular_user());
        assert!(!store.is_authenticated());
        assert!(store.user.borrow().is_none());
    }

    #[test]
    fn future_token_is_kept() {
        let fresh = jwt_with_exp(Utc::now().timestamp() + 3600);
        let store = MemorySessionStore::with_session(fresh.clone(), regular_user());
        assert_eq!(store.get_token(), Some(fresh));
    }

    #[test]
    fn token_expiry_reads_exp_claim_only_from_jwts() {
        assert_eq!(token_expiry(&jwt_with_exp(1_700_000_000)), Some(1_700_000_000));
        assert_eq!(token_expiry("not-a-jwt"), None);
        assert_eq!(token_expiry("a.!!!.c"), None);
        assert!(is_token_expired(&jwt_with_exp(10), 10));
        assert!(!is_token_expired("opaque", i64::MAX));
    }

    #[test]
    fn blank_token_is_not_a_session() {
        let store = MemorySessionStore::with_session("  ", regular_user());
        assert!(!store.is_authenticated());
    }
}
