//! # daybook-auth
//!
//! Session handling for the Daybook client.
//!
//! Provides the session lifecycle state machine ([`SessionManager`]), token
//! persistence in a credentials file or the OS keychain (`keyring`), the
//! `/api/auth/` endpoint client, and the authorized-request executor that
//! applies the refresh-once-then-logout policy to every API call.

pub mod claims;
pub mod client;
pub mod error;
pub mod session;
pub mod token_store;

pub use client::{AuthClient, RegisterRequest, TokenPair};
pub use error::AuthError;
pub use session::SessionManager;
pub use token_store::{FileStore, KeyringStore, MemoryStore, StoredSession, TokenStore};
