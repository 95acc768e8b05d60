//! Session credential contract.
//!
//! A signed-in session is the pair (`user` record, `auth` flag). Both are
//! written together on sign-in and removed together on logout.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use gridcast_core::UserId;

pub const USER_KEY: &str = "user";
pub const AUTH_FLAG_KEY: &str = "auth";
pub const AUTH_FLAG_VALUE: &str = "yes";
/// Email of the last registration; registration does not sign in.
pub const REGISTERED_USER_KEY: &str = "registered_user";

/// String key/value persistence for the session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
    }
}

/// The signed-in user as persisted under [`USER_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppUser {
    #[serde(alias = "user_id")]
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Accessors over a [`SessionStore`].
pub struct Session;

impl Session {
    /// The current user, if the flag is set and the user record parses.
    pub fn current(store: &dyn SessionStore) -> Option<AppUser> {
        if store.get(AUTH_FLAG_KEY).as_deref() != Some(AUTH_FLAG_VALUE) {
            return None;
        }
        let raw = store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!(error = %err, "stored session user is unreadable");
                None
            }
        }
    }

    pub fn is_active(store: &dyn SessionStore) -> bool {
        Self::current(store).is_some()
    }

    pub fn begin(store: &dyn SessionStore, user: &AppUser) -> Result<(), serde_json::Error> {
        let raw = serde_json::to_string(user)?;
        store.set(USER_KEY, raw);
        store.set(AUTH_FLAG_KEY, AUTH_FLAG_VALUE.to_string());
        Ok(())
    }

    pub fn end(store: &dyn SessionStore) {
        store.remove(USER_KEY);
        store.remove(AUTH_FLAG_KEY);
        store.remove(REGISTERED_USER_KEY);
    }
}
