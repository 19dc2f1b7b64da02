//! TTL-bounded memoized read of the authenticated user.
//!
//! Reading the session file on every permission check is wasteful; caching
//! it forever makes logout in another instance invisible. This cache sits in
//! between: reads are memoized for a fixed TTL and invalidated explicitly on
//! login/logout. The TTL is injected so tests can drive expiry.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;

use super::store::{AuthenticatedUser, SessionStore};

pub struct UserCache {
    cache: Cache<(), Arc<AuthenticatedUser>>,
    store: Arc<SessionStore>,
}

impl UserCache {
    pub fn new(store: Arc<SessionStore>, ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { cache, store }
    }

    /// Returns the authenticated user, served from the memoized read when it
    /// is still within its TTL.
    pub fn current_user(&self) -> Option<Arc<AuthenticatedUser>> {
        if let Some(user) = self.cache.get(&()) {
            return Some(user);
        }

        let user = Arc::new(self.store.user()?);
        self.cache.insert((), user.clone());
        Some(user)
    }

    /// Drops the memoized read. Call on login and logout.
    pub fn invalidate(&self) {
        self.cache.invalidate(&());
    }
}
