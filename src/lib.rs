//! # cognito-verify
//!
//! Verification of AWS Cognito id and access tokens.
//!
//! A [`CognitoVerifier`] is bound to one user pool and one app client. When it is
//! built it loads the pool's JSON Web Key Set, from a [`KeyCache`] when one holds
//! it and from `https://cognito-idp.{region}.amazonaws.com/{pool}/.well-known/jwks.json`
//! otherwise. Every verification afterwards runs in memory.
//!
//! ## Features
//!
//! - RS256 signature verification against the key named by the token's `kid`
//! - Issuer and expiration checks shared by all tokens
//! - `aud` and `sub` checks for id tokens, `client_id` checks for access tokens
//! - Pluggable key set cache, with no-op and in-memory implementations
//! - Stable numeric error codes
//!
//! ## Example
//!
//! ```rust,no_run
//! use cognito_verify::{CognitoVerifier, VerifierConfig, VerifyToken};
//! use cognito_verify::MemoryCache;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = VerifierConfig::new("eu-west-1", "eu-west-1_AbCdEf123", "my-app-client")
//!         .with_cache(Arc::new(MemoryCache::new()));
//!
//!     let verifier = CognitoVerifier::new(config).await?;
//!
//!     let token = "eyJraWQiOiJ...";
//!     match verifier.verify_id_token(token) {
//!         Ok(claims) => println!("Signed in: {:?}", claims.sub()),
//!         Err(e) => println!("Rejected ({}): {e}", e.code()),
//!     }
//!
//!     Ok(())
//! }
//! ```

mod cache;
mod claims;
mod config;
mod error;
mod jwks;
mod signature;
mod verifier;

// Re-exports for public API
pub use cache::KeyCache;
pub use cache::MemoryCache;
pub use cache::NoopCache;
pub use claims::Claims;
pub use config::VerifierConfig;
pub use error::Error;
pub use error::Result;
pub use jsonwebtoken::jwk::JwkSet;
pub use verifier::CognitoVerifier;
pub use verifier::VerifyToken;
