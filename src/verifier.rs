use chrono::Utc;
use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::JwkSet;

use crate::claims::validate_common;
use crate::claims::Claims;
use crate::config::VerifierConfig;
use crate::error::Error;
use crate::error::Result;
use crate::jwks::JwksFetcher;
use crate::signature;
use crate::signature::CompactToken;

/// Trait for Cognito token verification
///
/// Verification runs entirely in memory, so the methods are synchronous.
pub trait VerifyToken {
    /// Verify signature, issuer and expiration, returning all claims
    fn verify_token(&self, token: &str) -> Result<Claims>;

    /// Verify an id token: common checks plus `aud` and `sub`
    fn verify_id_token(&self, token: &str) -> Result<Claims>;

    /// Verify an access token: common checks plus `client_id` when present
    fn verify_access_token(&self, token: &str) -> Result<Claims>;
}

/// Verifier for the tokens of a single Cognito user pool and app client
///
/// The key set is acquired once, when the verifier is built, and stays
/// authoritative for its whole lifetime. A token signed with a key that was
/// rotated in later fails with [`Error::NoJwkForKid`] until a new verifier
/// is built.
#[derive(Debug)]
pub struct CognitoVerifier {
    jwks: JwkSet,
    issuer: String,
    client_id: String,
}

impl CognitoVerifier {
    /// Create a new verifier, loading the pool's key set from the cache or the network
    pub async fn new(config: VerifierConfig) -> Result<Self> {
        let issuer = config.issuer();
        let fetcher = JwksFetcher::new(
            config.cache.clone(),
            config.cache_key(),
            config.http_client.unwrap_or_default(),
        );

        let jwks = fetcher.fetch_key_set(&issuer).await?;

        tracing::debug!(
            target: "cognito_verify::verifier",
            issuer = %issuer,
            keys = jwks.keys.len(),
            "Cognito verifier ready"
        );

        Ok(Self {
            jwks,
            issuer,
            client_id: config.client_id,
        })
    }

    /// Create a new verifier for a user pool with default settings
    pub async fn with_pool(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self> {
        Self::new(VerifierConfig::new(region, user_pool_id, client_id)).await
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The key set this verifier checks signatures against
    pub fn key_set(&self) -> &JwkSet {
        &self.jwks
    }

    fn verify_with_clock(&self, token: &str, now: i64) -> Result<Claims> {
        let token = CompactToken::parse(token)?;
        let kid = token.kid().ok_or(Error::NoKidInToken)?;

        let jwk = self.find_key(kid)?;

        if !signature::verify(&token, jwk)? {
            return Err(Error::SignatureVerificationFailed);
        }

        let claims = Claims::decode(token.payload)?;

        validate_common(&claims, &self.issuer, now)?;

        Ok(claims)
    }

    fn find_key(&self, kid: &str) -> Result<&Jwk> {
        self.jwks
            .keys
            .iter()
            .find(|jwk| jwk.common.key_id.as_deref() == Some(kid))
            .ok_or_else(|| Error::NoJwkForKid(kid.to_string()))
    }

    fn check_id_claims(&self, claims: &Claims) -> Result<()> {
        if claims.aud() != Some(self.client_id.as_str()) {
            return Err(Error::InvalidAudience);
        }

        if claims.get("sub").is_none() {
            return Err(Error::MissingSubject);
        }

        Ok(())
    }

    fn check_access_claims(&self, claims: &Claims) -> Result<()> {
        match claims.get("client_id") {
            Some(client_id) if client_id.as_str() != Some(self.client_id.as_str()) => {
                Err(Error::InvalidClientIdAccess)
            }
            _ => Ok(()),
        }
    }
}

impl VerifyToken for CognitoVerifier {
    fn verify_token(&self, token: &str) -> Result<Claims> {
        self.verify_with_clock(token, Utc::now().timestamp())
            .inspect_err(log_rejection)
    }

    fn verify_id_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        self.check_id_claims(&claims).inspect_err(log_rejection)?;
        Ok(claims)
    }

    fn verify_access_token(&self, token: &str) -> Result<Claims> {
        let claims = self.verify_token(token)?;
        self.check_access_claims(&claims).inspect_err(log_rejection)?;
        Ok(claims)
    }
}

fn log_rejection(error: &Error) {
    tracing::warn!(
        target: "cognito_verify::verifier",
        code = error.code(),
        error = %error,
        "Token rejected"
    );
}
