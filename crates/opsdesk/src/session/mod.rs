//! Local session: bearer token, authenticated user, device identity.
//!
//! The session file is the only state this client persists. Concurrent
//! writers (two app instances under one account) are not coordinated; the
//! last write wins, matching the backend's view that the token is the only
//! authority that matters.

pub mod error;
pub mod store;
pub mod user_cache;

pub use error::SessionError;
pub use store::{AuthenticatedUser, SessionStore};
pub use user_cache::UserCache;
