use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::jwk::Jwk;
use jsonwebtoken::jwk::JwkSet;
use reqwest::Client;
use serde_json::Value;

use crate::cache::KeyCache;
use crate::error::fetch_jwks_error;
use crate::error::Error;
use crate::error::Result;

/// How long a fetched key set stays in the cache
pub(crate) const KEY_SET_TTL: Duration = Duration::from_secs(60 * 60);

const JWKS_PATH: &str = "/.well-known/jwks.json";

/// Fetches a user pool's JWKS, going through the cache first
pub(crate) struct JwksFetcher {
    cache: Arc<dyn KeyCache>,
    cache_key: String,
    client: Client,
}

impl JwksFetcher {
    pub(crate) fn new(cache: Arc<dyn KeyCache>, cache_key: String, client: Client) -> Self {
        Self {
            cache,
            cache_key,
            client,
        }
    }

    /// Get the key set for the given issuer, fetching from the network on a cache miss
    ///
    /// A cached set is returned as is, without re-validation.
    pub(crate) async fn fetch_key_set(&self, issuer: &str) -> Result<JwkSet> {
        if let Some(jwks) = self.try_get_cached().await {
            tracing::debug!(target: "cognito_verify::jwks", cache_key = %self.cache_key, "JWKS cache hit");
            return Ok(jwks);
        }

        tracing::debug!(target: "cognito_verify::jwks", cache_key = %self.cache_key, "JWKS cache miss");

        let jwks = self.fetch_jwks(issuer).await.inspect_err(|e| {
            tracing::warn!(target: "cognito_verify::jwks", issuer = %issuer, error = %e, "Could not acquire JWKS");
        })?;

        self.cache
            .put(&self.cache_key, jwks.clone(), KEY_SET_TTL)
            .await;

        Ok(jwks)
    }

    async fn try_get_cached(&self) -> Option<JwkSet> {
        if !self.cache.has(&self.cache_key).await {
            return None;
        }

        self.cache.get(&self.cache_key).await
    }

    async fn fetch_jwks(&self, issuer: &str) -> Result<JwkSet> {
        let url = format!("{issuer}{JWKS_PATH}");

        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(fetch_jwks_error)?
            .text()
            .await
            .map_err(fetch_jwks_error)?;

        parse_key_set(&body)
    }
}

/// Parse a JWKS document, requiring a `keys` array
///
/// Keys this crate cannot read (encryption keys, unknown algorithms) are
/// skipped; the remaining keys keep their order.
pub(crate) fn parse_key_set(body: &str) -> Result<JwkSet> {
    if body.trim().is_empty() {
        return Err(Error::JwksFetchFailed("empty response body".to_string()));
    }

    let mut document: Value = serde_json::from_str(body)
        .map_err(|e| Error::JwksInvalidFormat(format!("response is not JSON: {e}")))?;

    let Some(Value::Array(entries)) = document.get_mut("keys").map(Value::take) else {
        return Err(Error::JwksInvalidFormat(
            "missing 'keys' collection".to_string(),
        ));
    };

    let keys = entries
        .into_iter()
        .filter_map(|entry| {
            let kid = entry.get("kid").cloned();
            serde_json::from_value::<Jwk>(entry)
                .inspect_err(|e| {
                    tracing::debug!(target: "cognito_verify::jwks", kid = ?kid, error = %e, "Skipping unreadable JWK");
                })
                .ok()
        })
        .collect();

    Ok(JwkSet { keys })
}
