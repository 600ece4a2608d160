use std::fmt;
use std::sync::Arc;

use reqwest::Client;

use crate::cache::KeyCache;
use crate::cache::NoopCache;

const COGNITO_CACHE_KEY_PREFIX: &str = "cognito_jwks_";

/// Configuration for the Cognito token verifier
#[derive(Clone)]
pub struct VerifierConfig {
    /// AWS region of the user pool, e.g. `eu-west-1`
    pub(crate) region: String,
    /// Cognito user pool id, e.g. `eu-west-1_AbCdEf123`
    pub(crate) user_pool_id: String,
    /// App client id the tokens must be issued for
    pub(crate) client_id: String,
    /// Cache consulted before fetching the JWKS (default: no caching)
    pub(crate) cache: Arc<dyn KeyCache>,
    /// Optional custom HTTP client for fetching JWKS
    /// If not provided, a default client will be created
    pub(crate) http_client: Option<Client>,
    /// Base URL replacing `https://cognito-idp.{region}.amazonaws.com`
    pub(crate) endpoint: Option<String>,
}

impl VerifierConfig {
    /// Create a new configuration for the given user pool and app client
    pub fn new(
        region: impl Into<String>,
        user_pool_id: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            user_pool_id: user_pool_id.into(),
            client_id: client_id.into(),
            cache: Arc::new(NoopCache),
            http_client: None,
            endpoint: None,
        }
    }

    /// Set the cache used to store the fetched key set
    pub fn with_cache(mut self, cache: Arc<dyn KeyCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Set a custom HTTP client
    ///
    /// Construction blocks on the JWKS request, so a client with a timeout
    /// is the way to bound it.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Point the verifier at a Cognito-compatible endpoint (cognito-local, LocalStack)
    ///
    /// The issuer becomes `{endpoint}/{user_pool_id}`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into().trim_end_matches('/').to_string());
        self
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn user_pool_id(&self) -> &str {
        &self.user_pool_id
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// The `iss` value every token of this pool carries
    pub fn issuer(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/{}", self.user_pool_id),
            None => format!(
                "https://cognito-idp.{}.amazonaws.com/{}",
                self.region, self.user_pool_id
            ),
        }
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer())
    }

    /// Key under which the pool's key set is cached
    pub fn cache_key(&self) -> String {
        format!("{COGNITO_CACHE_KEY_PREFIX}{}", self.user_pool_id)
    }
}

impl fmt::Debug for VerifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierConfig")
            .field("region", &self.region)
            .field("user_pool_id", &self.user_pool_id)
            .field("client_id", &self.client_id)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}
