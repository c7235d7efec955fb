//! Authentication module
//!
//! Supports: IAM API key, Basic, Bearer, CouchDB session cookie, none.
//!
//! The `Authenticator` handles all auth types and manages token caching
//! for the ones that require a token exchange.

mod authenticator;
mod types;

pub use authenticator::{Authenticate, Authenticator};
pub use types::{AuthConfig, CachedToken, DEFAULT_IAM_URL};

#[cfg(test)]
mod tests;
