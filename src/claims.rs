use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::error::Error;
use crate::error::Result;

/// The decoded payload of a verified token
///
/// Holds every claim the token carried, not only the ones checked during
/// verification. Typed accessors cover the claims Cognito puts in id and
/// access tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Decode an unpadded base64url payload segment into a JSON object
    pub(crate) fn decode(segment: &str) -> Result<Self> {
        let bytes = URL_SAFE_NO_PAD
            .decode(segment)
            .map_err(|_| Error::TokenPayloadDecodingFailed)?;

        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) if !map.is_empty() => Ok(Self(map)),
            _ => Err(Error::TokenPayloadDecodingFailed),
        }
    }

    /// Raw claim value, `None` when absent or `null`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    /// Claim value as a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn iss(&self) -> Option<&str> {
        self.get_str("iss")
    }

    pub fn sub(&self) -> Option<&str> {
        self.get_str("sub")
    }

    pub fn aud(&self) -> Option<&str> {
        self.get_str("aud")
    }

    /// `client_id`, present on access tokens
    pub fn client_id(&self) -> Option<&str> {
        self.get_str("client_id")
    }

    /// `token_use`, `"id"` or `"access"` on Cognito tokens
    pub fn token_use(&self) -> Option<&str> {
        self.get_str("token_use")
    }

    /// `cognito:username` on id tokens, `username` on access tokens
    pub fn username(&self) -> Option<&str> {
        self.get_str("cognito:username")
            .or_else(|| self.get_str("username"))
    }

    /// Expiration time as a Unix timestamp
    ///
    /// Fractional timestamps are truncated.
    pub fn exp(&self) -> Result<Option<i64>> {
        let Some(exp) = self.get("exp") else {
            return Ok(None);
        };

        exp.as_i64()
            .or_else(|| exp.as_f64().map(|exp| exp as i64))
            .map(Some)
            .ok_or_else(|| Error::InvalidToken("'exp' claim is not a number".to_string()))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Checks shared by every token kind, in order: issuer, then expiration
///
/// A token without `exp` passes.
pub(crate) fn validate_common(claims: &Claims, expected_issuer: &str, now: i64) -> Result<()> {
    if claims.iss() != Some(expected_issuer) {
        return Err(Error::InvalidIssuer(
            claims.iss().unwrap_or_default().to_string(),
        ));
    }

    if let Some(exp) = claims.exp()? {
        if now > exp {
            return Err(Error::TokenExpired(exp));
        }
    }

    Ok(())
}
